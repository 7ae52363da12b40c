use std::rc::Rc;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::flow::{FlowState, Step};

/// The request-path diagram: one node per step, status text underneath
pub struct FlowView;

impl FlowView {
    /// Height needed for nodes plus status text
    pub const HEIGHT: u16 = 9;

    fn node_style(active: bool, failed: bool) -> Style {
        if failed {
            Style::default().fg(Color::Red)
        } else if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn is_failed(state: &FlowState, step: Step) -> bool {
        state
            .last_failure
            .as_ref()
            .is_some_and(|failure| failure.step == step)
    }

    /// Node, arrow, node, arrow, ... Nodes share the width left after the
    /// fixed arrow gaps.
    fn columns(area: Rect) -> Rc<[Rect]> {
        let mut constraints = Vec::with_capacity(Step::ALL.len() * 2 - 1);
        for i in 0..Step::ALL.len() {
            if i > 0 {
                constraints.push(Constraint::Length(3));
            }
            constraints.push(Constraint::Fill(1));
        }
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area)
    }

    pub fn render(frame: &mut Frame, area: Rect, state: &FlowState) {
        let outer = Block::default()
            .title(" System Flow ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let columns = Self::columns(inner);

        for (i, step) in Step::ALL.into_iter().enumerate() {
            let column = columns[i * 2];
            let active = state.active == Some(step);
            let failed = Self::is_failed(state, step);
            let style = Self::node_style(active, failed);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(column);

            let border_type = if active {
                BorderType::Thick
            } else {
                BorderType::Rounded
            };
            let node = Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", step.glyph()), style),
                Span::styled(step.label(), style),
            ]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(style),
            );
            frame.render_widget(node, rows[0]);

            let status_style = if failed {
                Style::default().fg(Color::Red)
            } else if active {
                Style::default().fg(Color::Cyan)
            } else if state.status.contains_key(&step) {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let status = Paragraph::new(state.status_text(step))
                .style(status_style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(status, rows[1]);

            if i + 1 < Step::ALL.len() {
                let arrow_area = columns[i * 2 + 1];
                let arrow_row = Rect {
                    y: arrow_area.y + 1,
                    height: 1,
                    ..arrow_area
                };
                let lit = state
                    .active
                    .is_some_and(|current| current.index() > step.index());
                let arrow_style = if lit {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                frame.render_widget(
                    Paragraph::new(Span::styled("─▶", arrow_style)).alignment(Alignment::Center),
                    arrow_row,
                );
            }
        }
    }
}
