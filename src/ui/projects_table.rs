use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::Project;

/// Project list with a selection cursor
pub struct ProjectsTable {
    pub projects: Vec<Project>,
    pub state: TableState,
}

impl ProjectsTable {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            state: TableState::default(),
        }
    }

    /// Replace the rows, keeping the selection on the same id when possible
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        let selected_id = self.selected().map(|p| p.id);
        self.projects = projects;

        let index = selected_id
            .and_then(|id| self.projects.iter().position(|p| p.id == id))
            .or_else(|| {
                self.state
                    .selected()
                    .map(|i| i.min(self.projects.len().saturating_sub(1)))
            })
            .or(Some(0))
            .filter(|_| !self.projects.is_empty());
        self.state.select(index);
    }

    pub fn selected(&self) -> Option<&Project> {
        self.state.selected().and_then(|i| self.projects.get(i))
    }

    pub fn select_next(&mut self) {
        let len = self.projects.len();
        if len > 0 {
            let i = self
                .state
                .selected()
                .map_or(0, |i| if i >= len - 1 { 0 } else { i + 1 });
            self.state.select(Some(i));
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.projects.len();
        if len > 0 {
            let i = self
                .state
                .selected()
                .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
            self.state.select(Some(i));
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, enabled: bool) {
        let border_style = if enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(" Energy Resiliency Projects ({}) ", self.projects.len()))
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.projects.is_empty() {
            let empty = Paragraph::new(Line::from("No projects found."))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(ratatui::layout::Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(
            ["Name", "Location", "Impact", "Description"]
                .into_iter()
                .map(|h| Cell::from(h).style(Style::default().fg(Color::Cyan))),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.projects.iter().map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()).style(Style::default().fg(Color::White)),
                Cell::from(p.location.clone()),
                Cell::from(format!("{:.1}", p.impact_score))
                    .style(Style::default().fg(impact_color(p.impact_score))),
                Cell::from(p.description.replace('\n', " ")),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(18),
                Constraint::Length(7),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

impl Default for ProjectsTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Color band for an impact score
fn impact_color(score: f64) -> Color {
    if score >= 8.0 {
        Color::Green
    } else if score >= 6.0 {
        Color::Yellow
    } else {
        Color::Gray
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            location: "Ashburn, VA".to_string(),
            impact_score: 7.9,
            description: String::new(),
        }
    }

    #[test]
    fn test_set_projects_selects_first() {
        let mut table = ProjectsTable::new();
        table.set_projects(vec![project(1, "a"), project(2, "b")]);
        assert_eq!(table.selected().unwrap().id, 1);
    }

    #[test]
    fn test_set_projects_keeps_selected_id() {
        let mut table = ProjectsTable::new();
        table.set_projects(vec![project(1, "a"), project(2, "b")]);
        table.select_next();

        table.set_projects(vec![project(0, "new"), project(1, "a"), project(2, "b")]);
        assert_eq!(table.selected().unwrap().id, 2);
    }

    #[test]
    fn test_set_projects_after_delete_clamps_index() {
        let mut table = ProjectsTable::new();
        table.set_projects(vec![project(1, "a"), project(2, "b")]);
        table.select_next();

        table.set_projects(vec![project(1, "a")]);
        assert_eq!(table.selected().unwrap().id, 1);

        table.set_projects(Vec::new());
        assert!(table.selected().is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let mut table = ProjectsTable::new();
        table.set_projects(vec![project(1, "a"), project(2, "b"), project(3, "c")]);

        table.select_prev();
        assert_eq!(table.selected().unwrap().id, 3);
        table.select_next();
        assert_eq!(table.selected().unwrap().id, 1);
    }

    #[test]
    fn test_impact_color_bands() {
        assert_eq!(impact_color(9.2), Color::Green);
        assert_eq!(impact_color(6.8), Color::Yellow);
        assert_eq!(impact_color(5.4), Color::Gray);
    }
}
