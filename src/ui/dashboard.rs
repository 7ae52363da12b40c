use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::flow_view::FlowView;
use super::panels::{CallPanel, HeaderBar, StatusBar};
use super::projects_table::ProjectsTable;
use crate::api::Project;
use crate::flow::FlowState;

pub struct Dashboard {
    pub table: ProjectsTable,
    /// Latest snapshot received from the sequencer
    pub flow: FlowState,
    /// A flow run is in progress
    pub busy: bool,
    pub animate: bool,
    /// Failure or notice shown in the status bar
    pub message: Option<String>,
    base_url: String,
}

impl Dashboard {
    pub fn new(base_url: impl Into<String>, animate: bool) -> Self {
        Self {
            table: ProjectsTable::new(),
            flow: FlowState::default(),
            busy: false,
            animate,
            message: None,
            base_url: base_url.into(),
        }
    }

    pub fn update_projects(&mut self, projects: Vec<Project>) {
        self.table.set_projects(projects);
    }

    pub fn update_flow(&mut self, state: FlowState) {
        self.flow = state;
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.table.selected()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                // Header
                Constraint::Length(FlowView::HEIGHT), // Flow diagram
                Constraint::Length(CallPanel::HEIGHT),
                Constraint::Min(5), // Projects
                Constraint::Length(1),
            ])
            .split(frame.area());

        let header = HeaderBar {
            version: env!("CARGO_PKG_VERSION"),
            base_url: &self.base_url,
        };
        header.render(frame, chunks[0]);

        FlowView::render(frame, chunks[1], &self.flow);
        CallPanel::render(frame, chunks[2], &self.flow);
        self.table.render(frame, chunks[3], !self.busy);

        let status = StatusBar {
            busy: self.busy,
            animate: self.animate,
            message: self.message.as_deref(),
        };
        status.render(frame, chunks[4]);
    }
}
