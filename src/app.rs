use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::actions::{run_action, FlowAction, FlowOutcome};
use crate::api::ProjectsApi;
use crate::config::Config;
use crate::flow::{FlowError, FlowPacing, FlowSequencer, FlowState};
use crate::ui::{
    ConfirmDeleteDialog, Dashboard, FormAction, FormMode, HelpDialog, ProjectForm,
    TerminalGuard,
};

const BUSY_MESSAGE: &str = "Wait for the current flow to finish";

/// A flow run in a spawned task. The sequencer travels with it and comes
/// back when the run completes.
type FlowTask = JoinHandle<(FlowSequencer, Result<FlowOutcome, FlowError>)>;

pub struct App {
    api: Arc<dyn ProjectsApi>,
    /// Desired pacing; applied to the sequencer whenever it is home
    pacing: FlowPacing,
    /// `None` while lent out to a running flow
    sequencer: Option<FlowSequencer>,
    flow_rx: watch::Receiver<FlowState>,
    task: Option<FlowTask>,
    dashboard: Dashboard,
    form: ProjectForm,
    confirm_dialog: ConfirmDeleteDialog,
    help_dialog: HelpDialog,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, api: Arc<dyn ProjectsApi>, base_url: &str) -> Self {
        let pacing = FlowPacing::from(&config.flow);
        let sequencer = FlowSequencer::new(pacing);
        let flow_rx = sequencer.subscribe();

        Self {
            api,
            pacing,
            sequencer: Some(sequencer),
            flow_rx,
            task: None,
            dashboard: Dashboard::new(base_url, pacing.animate),
            form: ProjectForm::new(),
            confirm_dialog: ConfirmDeleteDialog::new(),
            help_dialog: HelpDialog::new(),
            tick_rate: Duration::from_millis(config.ui.refresh_rate_ms),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::new()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .context("Failed to create terminal")?;

        // Initial data load
        self.start(FlowAction::Load);

        while !self.should_quit {
            self.sync_flow();
            terminal.draw(|f| self.render(f))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.poll_task().await;
        }

        if let Some(task) = self.task.take() {
            tracing::info!("Quitting with a flow in progress");
            task.abort();
        }
        terminal.show_cursor()?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        self.dashboard.render(frame);
        self.form.render(frame);
        self.confirm_dialog.render(frame);
        self.help_dialog.render(frame);
    }

    pub fn is_busy(&self) -> bool {
        self.sequencer.is_none()
    }

    /// Copy the latest flow snapshot into the dashboard
    fn sync_flow(&mut self) {
        let state = self.flow_rx.borrow_and_update().clone();
        self.dashboard.update_flow(state);
        self.dashboard.busy = self.is_busy();
        self.dashboard.animate = self.pacing.animate;
    }

    /// Spawn a flow run. Returns false, doing nothing, while another run
    /// is in progress.
    fn start(&mut self, action: FlowAction) -> bool {
        let Some(mut sequencer) = self.sequencer.take() else {
            tracing::debug!(?action, "Flow already running, ignoring trigger");
            return false;
        };

        let api = Arc::clone(&self.api);
        self.dashboard.message = None;
        self.task = Some(tokio::spawn(async move {
            let result = run_action(&mut sequencer, api.as_ref(), &action).await;
            (sequencer, result)
        }));
        true
    }

    /// Collect a finished run without blocking
    async fn poll_task(&mut self) {
        if !self.task.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        if let Some(task) = self.task.take() {
            self.complete(task).await;
        }
    }

    async fn complete(&mut self, task: FlowTask) {
        match task.await {
            Ok((mut sequencer, result)) => {
                if sequencer.pacing().animate != self.pacing.animate {
                    sequencer.set_animation(self.pacing.animate);
                }
                self.sequencer = Some(sequencer);
                self.apply_outcome(result);
            }
            Err(err) => {
                tracing::error!(error = %err, "Flow task did not complete");
                let sequencer = FlowSequencer::new(self.pacing);
                self.flow_rx = sequencer.subscribe();
                self.sequencer = Some(sequencer);
                self.dashboard.message = Some(format!("Flow task did not complete: {}", err));
            }
        }
    }

    fn apply_outcome(&mut self, result: Result<FlowOutcome, FlowError>) {
        match result {
            Ok(FlowOutcome::Projects(projects)) => {
                tracing::debug!(count = projects.len(), "Projects loaded");
                self.dashboard.update_projects(projects);
            }
            Ok(FlowOutcome::Generated(fields)) => {
                if self.form.visible {
                    self.form.prefill(&fields);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, kind = %err.api_error().kind(), "Flow failed");
                self.dashboard.message = Some(err.to_string());
            }
        }
    }

    fn toggle_animation(&mut self) {
        self.pacing.animate = !self.pacing.animate;
        if let Some(ref mut sequencer) = self.sequencer {
            sequencer.set_animation(self.pacing.animate);
        }
        self.dashboard.animate = self.pacing.animate;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Help closes on any key
        if self.help_dialog.visible {
            self.help_dialog.toggle();
            return;
        }
        if self.confirm_dialog.visible {
            self.handle_confirm_key(key.code);
            return;
        }
        if self.form.visible {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.help_dialog.toggle();
            }
            KeyCode::Char('t') => {
                self.toggle_animation();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.dashboard.table.select_next();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.dashboard.table.select_prev();
            }
            KeyCode::Char('a') if !self.is_busy() => {
                self.form.open_add();
            }
            KeyCode::Char('e') | KeyCode::Enter if !self.is_busy() => {
                if let Some(project) = self.dashboard.selected_project().cloned() {
                    self.form.open_edit(&project);
                }
            }
            KeyCode::Char('d') if !self.is_busy() => {
                if let Some(project) = self.dashboard.selected_project().cloned() {
                    self.confirm_dialog.show(project);
                }
            }
            KeyCode::Char('r') => {
                self.start(FlowAction::Load);
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match self.form.handle_key(key) {
            FormAction::None => {}
            FormAction::Cancel => self.form.close(),
            FormAction::Generate => {
                if !self.start(FlowAction::Generate) {
                    self.form.error = Some(BUSY_MESSAGE.to_string());
                }
            }
            FormAction::Submit(mode, fields) => {
                if self.is_busy() {
                    self.form.error = Some(BUSY_MESSAGE.to_string());
                    return;
                }
                self.form.close();
                let action = match mode {
                    FormMode::Add => FlowAction::Create(fields),
                    FormMode::Edit(id) => FlowAction::Update(id, fields),
                };
                self.start(action);
            }
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.confirm_dialog.selection = crate::ui::ConfirmSelection::Delete;
                self.confirm_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_dialog.hide();
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Left => {
                self.confirm_dialog.toggle_selection();
            }
            KeyCode::Enter => {
                self.confirm_delete();
            }
            _ => {}
        }
    }

    fn confirm_delete(&mut self) {
        if let Some(project) = self.confirm_dialog.confirm() {
            if !self.start(FlowAction::Delete(project.id)) {
                self.dashboard.message = Some("A flow is already running".to_string());
            }
        }
    }
}
