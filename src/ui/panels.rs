use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::flow::FlowState;

pub struct HeaderBar<'a> {
    pub version: &'a str,
    pub base_url: &'a str,
}

impl HeaderBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                " resflow ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" v{} ", self.version),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(" "),
            Span::styled(self.base_url, Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// In-flight or last API call
pub struct CallPanel;

impl CallPanel {
    pub const HEIGHT: u16 = 8;

    pub fn render(frame: &mut Frame, area: Rect, state: &FlowState) {
        let (title, body, color) = match state.call_display() {
            Some((title, body)) => {
                let color = if state.pending_call.is_some() {
                    Color::Cyan
                } else {
                    Color::Gray
                };
                (format!(" {} ", title), body.to_string(), color)
            }
            None => (
                " API call ".to_string(),
                "No API call yet".to_string(),
                Color::DarkGray,
            ),
        };

        let panel = Paragraph::new(body)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(panel, area);
    }
}

pub struct StatusBar<'a> {
    pub busy: bool,
    pub animate: bool,
    /// Most recent failure or notice
    pub message: Option<&'a str>,
}

impl StatusBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();

        if self.busy {
            spans.push(Span::styled(
                " RUNNING ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                " IDLE ",
                Style::default().fg(Color::Black).bg(Color::Green),
            ));
        }

        spans.push(Span::raw("  Delay: "));
        spans.push(if self.animate {
            Span::styled("on", Style::default().fg(Color::Cyan))
        } else {
            Span::styled("off", Style::default().fg(Color::DarkGray))
        });

        if let Some(message) = self.message {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(message, Style::default().fg(Color::Red)));
        }

        spans.push(Span::styled(
            "  [?] help  [q] quit",
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_call_panel_shows_pending_call() {
        let state = FlowState {
            pending_call: Some("DELETE /api/projects/2".to_string()),
            last_call: Some("GET /api/projects".to_string()),
            ..Default::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(60, CallPanel::HEIGHT)).unwrap();
        terminal
            .draw(|f| CallPanel::render(f, f.area(), &state))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("API call in progress"));
        assert!(text.contains("DELETE /api/projects/2"));
        assert!(!text.contains("GET /api/projects"));
    }

    #[test]
    fn test_status_bar_shows_delay_and_message() {
        let status = StatusBar {
            busy: true,
            animate: false,
            message: Some("db step failed"),
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal.draw(|f| status.render(f, f.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("RUNNING"));
        assert!(text.contains("Delay: off"));
        assert!(text.contains("db step failed"));
    }
}
