//! Knob panes widget - one column per pane, three knobs each

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use euro_dsp::Slot;

use super::UiState;

const BAR_WIDTH: usize = 12;

fn bar(value: f32) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_panes(frame: &mut Frame, area: Rect, state: &UiState) {
    let manager = state.manager();
    let count = manager.panes().len();
    if count == 0 {
        frame.render_widget(Paragraph::new(" no topology built").block(Block::default().borders(Borders::ALL)), area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count as u32); count])
        .split(area);

    for (index, column) in columns.iter().enumerate() {
        let selected = index == state.pane();
        let border = if selected { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .title(format!(" pane {index} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let mut lines = Vec::new();
        for slot in Slot::ALL {
            let meta = manager.meta(index, slot).copied().unwrap_or_default();
            let value = manager.get(index, slot);
            let active = selected && slot == state.slot();
            let label_style = if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            if meta.is_blank() {
                lines.push(Line::from(Span::styled(" -", Style::default().fg(Color::DarkGray))));
                lines.push(Line::default());
                continue;
            }
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", meta.label), label_style),
                Span::styled(format!("{:.3}", meta.display(value)), Style::default().fg(Color::Green)),
            ]));
            lines.push(Line::from(Span::styled(
                format!(" {}", bar(value)),
                Style::default().fg(if active { Color::Yellow } else { Color::Blue }),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}
