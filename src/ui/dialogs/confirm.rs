use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::api::Project;

/// Selection state for the confirm dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmSelection {
    Delete,
    Keep,
}

impl ConfirmSelection {
    fn toggle(self) -> Self {
        match self {
            Self::Delete => Self::Keep,
            Self::Keep => Self::Delete,
        }
    }
}

/// Asks before a project is deleted
pub struct ConfirmDeleteDialog {
    pub visible: bool,
    pub project: Option<Project>,
    pub selection: ConfirmSelection,
}

impl ConfirmDeleteDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            project: None,
            // Default to the non-destructive choice
            selection: ConfirmSelection::Keep,
        }
    }

    pub fn show(&mut self, project: Project) {
        self.project = Some(project);
        self.selection = ConfirmSelection::Keep;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.project = None;
    }

    pub fn toggle_selection(&mut self) {
        self.selection = self.selection.toggle();
    }

    /// Hide the dialog and return the project if deletion was confirmed
    pub fn confirm(&mut self) -> Option<Project> {
        let project = self.project.take();
        let confirmed = self.selection == ConfirmSelection::Delete;
        self.hide();
        project.filter(|_| confirmed)
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let Some(ref project) = self.project else {
            return;
        };

        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Delete Project ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(inner);

        let message = vec![
            Line::from(vec![
                Span::raw("Delete "),
                Span::styled(
                    project.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" (#{})?", project.id)),
            ]),
            Line::from(Span::styled(
                project.location.as_str(),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[0],
        );

        let button = |label: &'static str, selected: bool, color: Color| {
            if selected {
                Span::styled(
                    format!("[ {} ]", label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!("  {}  ", label), Style::default().fg(color))
            }
        };
        let buttons = Line::from(vec![
            button(
                "Delete",
                self.selection == ConfirmSelection::Delete,
                Color::Red,
            ),
            Span::raw("   "),
            button("Keep", self.selection == ConfirmSelection::Keep, Color::Gray),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

impl Default for ConfirmDeleteDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: 6,
            name: "Onsite Diesel Reduction".to_string(),
            location: "London, UK".to_string(),
            impact_score: 5.4,
            description: "Hybrid generator system".to_string(),
        }
    }

    #[test]
    fn test_defaults_to_keep() {
        let mut dialog = ConfirmDeleteDialog::new();
        dialog.show(project());
        assert!(dialog.visible);
        assert_eq!(dialog.selection, ConfirmSelection::Keep);
        assert!(dialog.confirm().is_none());
        assert!(!dialog.visible);
    }

    #[test]
    fn test_confirm_delete_returns_project() {
        let mut dialog = ConfirmDeleteDialog::new();
        dialog.show(project());
        dialog.toggle_selection();
        assert_eq!(dialog.selection, ConfirmSelection::Delete);

        let confirmed = dialog.confirm().unwrap();
        assert_eq!(confirmed.id, 6);
        assert!(dialog.project.is_none());
    }

    #[test]
    fn test_show_resets_selection() {
        let mut dialog = ConfirmDeleteDialog::new();
        dialog.show(project());
        dialog.toggle_selection();
        dialog.hide();

        dialog.show(project());
        assert_eq!(dialog.selection, ConfirmSelection::Keep);
    }
}
