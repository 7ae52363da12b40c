use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialogs::centered_rect;
use super::form_field::FormField;
use crate::api::{Project, ProjectFields};

const NAME: usize = 0;
const LOCATION: usize = 1;
const IMPACT: usize = 2;
const DESCRIPTION: usize = 3;

const LABELS: [&str; 4] = ["Name", "Location", "Impact Score", "Description"];

/// Whether the form creates a project or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

/// What the caller should do after a key press
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    None,
    Cancel,
    /// Fields passed validation
    Submit(FormMode, ProjectFields),
    /// Ask the service for a suggested project
    Generate,
}

/// Modal add/edit form
pub struct ProjectForm {
    pub visible: bool,
    pub mode: FormMode,
    fields: Vec<FormField>,
    focused: usize,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

impl ProjectForm {
    pub fn new() -> Self {
        Self {
            visible: false,
            mode: FormMode::Add,
            fields: Self::empty_fields(),
            focused: NAME,
            error: None,
        }
    }

    fn empty_fields() -> Vec<FormField> {
        vec![
            FormField::text("Solar Microgrid Upgrade"),
            FormField::text("Dallas, TX"),
            FormField::decimal("0 - 10"),
            FormField::text_area("What the project does"),
        ]
    }

    pub fn open_add(&mut self) {
        self.fields = Self::empty_fields();
        self.mode = FormMode::Add;
        self.focused = NAME;
        self.error = None;
        self.visible = true;
    }

    pub fn open_edit(&mut self, project: &Project) {
        self.fields = Self::empty_fields();
        self.prefill(&project.fields());
        self.mode = FormMode::Edit(project.id);
        self.focused = NAME;
        self.error = None;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.error = None;
    }

    /// Replace every field, e.g. with a generated suggestion
    pub fn prefill(&mut self, fields: &ProjectFields) {
        self.fields[NAME].set_value(&fields.name);
        self.fields[LOCATION].set_value(&fields.location);
        self.fields[IMPACT].set_value(&fields.impact_score.to_string());
        self.fields[DESCRIPTION].set_value(&fields.description);
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Parse and validate the current input
    pub fn to_fields(&self) -> Result<ProjectFields, String> {
        let impact_raw = self.fields[IMPACT].value();
        let impact_score = impact_raw
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Impact score '{}' is not a number", impact_raw.trim()))?;

        let fields = ProjectFields {
            name: self.fields[NAME].value().trim().to_string(),
            location: self.fields[LOCATION].value().trim().to_string(),
            impact_score,
            description: self.fields[DESCRIPTION].value().trim().to_string(),
        };
        fields.validate()?;
        Ok(fields)
    }

    fn submit(&mut self) -> FormAction {
        match self.to_fields() {
            Ok(fields) => {
                self.error = None;
                FormAction::Submit(self.mode, fields)
            }
            Err(message) => {
                self.error = Some(message);
                FormAction::None
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('g') => FormAction::Generate,
                KeyCode::Char('s') => self.submit(),
                _ => FormAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => FormAction::Cancel,
            KeyCode::Tab => {
                self.focused = (self.focused + 1) % self.fields.len();
                FormAction::None
            }
            KeyCode::BackTab => {
                self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
                FormAction::None
            }
            // Inside the description these keys belong to the text area
            KeyCode::Down | KeyCode::Enter if self.focused != DESCRIPTION => {
                self.focused += 1;
                FormAction::None
            }
            KeyCode::Up if self.focused != DESCRIPTION => {
                self.focused = self.focused.saturating_sub(1);
                FormAction::None
            }
            code => {
                self.fields[self.focused].handle_key(code);
                FormAction::None
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);

        let title = match self.mode {
            FormMode::Add => " Add Project ".to_string(),
            FormMode::Edit(id) => format!(" Edit Project #{} ", id),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = Vec::new();
        for field in &self.fields {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(field.render_height()));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1)); // Error
        constraints.push(Constraint::Min(1)); // Hints

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter_mut().enumerate() {
            let focused = i == self.focused;
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(LABELS[i], label_style)),
                chunks[i * 3],
            );
            field.render(frame, chunks[i * 3 + 1], focused);
        }

        let base = self.fields.len() * 3;
        if let Some(ref error) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
                chunks[base],
            );
        }

        let submit_label = match self.mode {
            FormMode::Add => "add",
            FormMode::Edit(_) => "update",
        };
        let hints = Line::from(vec![
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::raw(" next  "),
            Span::styled("[Ctrl+G]", Style::default().fg(Color::Yellow)),
            Span::raw(" generate  "),
            Span::styled("[Ctrl+S]", Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}  ", submit_label)),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(hints), chunks[base + 1]);
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(form: &mut ProjectForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn sample() -> Project {
        Project {
            id: 4,
            name: "Fuel Cell Backup".to_string(),
            location: "San Jose, CA".to_string(),
            impact_score: 6.8,
            description: "Hydrogen fuel cell backup".to_string(),
        }
    }

    #[test]
    fn test_open_edit_prefills_fields() {
        let mut form = ProjectForm::new();
        form.open_edit(&sample());

        assert!(form.visible);
        assert_eq!(form.mode, FormMode::Edit(4));
        assert_eq!(form.to_fields().unwrap(), sample().fields());
    }

    #[test]
    fn test_fill_and_submit_add() {
        let mut form = ProjectForm::new();
        form.open_add();

        type_str(&mut form, "Solar Array");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "Austin");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "7.5");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "Rooftop array");

        match form.handle_key(ctrl('s')) {
            FormAction::Submit(FormMode::Add, fields) => {
                assert_eq!(fields.name, "Solar Array");
                assert_eq!(fields.location, "Austin");
                assert!((fields.impact_score - 7.5).abs() < f64::EPSILON);
                assert_eq!(fields.description, "Rooftop array");
            }
            other => panic!("Expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_with_missing_fields_sets_error() {
        let mut form = ProjectForm::new();
        form.open_add();
        type_str(&mut form, "Only a name");

        assert_eq!(form.handle_key(ctrl('s')), FormAction::None);
        assert!(form.error.as_ref().unwrap().contains("Impact score"));
    }

    #[test]
    fn test_out_of_range_impact_rejected() {
        let mut form = ProjectForm::new();
        let mut project = sample();
        project.impact_score = 12.0;
        form.open_edit(&project);

        assert_eq!(form.handle_key(ctrl('s')), FormAction::None);
        assert!(form.error.is_some());
    }

    #[test]
    fn test_generate_and_cancel_actions() {
        let mut form = ProjectForm::new();
        form.open_add();
        assert_eq!(form.handle_key(ctrl('g')), FormAction::Generate);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
    }

    #[test]
    fn test_prefill_replaces_existing_input() {
        let mut form = ProjectForm::new();
        form.open_add();
        type_str(&mut form, "draft");

        form.prefill(&sample().fields());
        assert_eq!(form.to_fields().unwrap().name, "Fuel Cell Backup");
    }

    #[test]
    fn test_focus_navigation_wraps() {
        let mut form = ProjectForm::new();
        form.open_add();
        assert_eq!(form.focused(), NAME);

        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused(), DESCRIPTION);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused(), NAME);

        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.focused(), LOCATION);
    }

    #[test]
    fn test_enter_in_description_inserts_newline() {
        let mut form = ProjectForm::new();
        form.open_edit(&sample());
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused(), DESCRIPTION);

        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::None);
        assert_eq!(form.focused(), DESCRIPTION);
    }
}
