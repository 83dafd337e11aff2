//! Oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Index of the first rising zero crossing, so the trace stands still for
/// periodic signals.
fn trigger(samples: &[f32]) -> usize {
    samples
        .windows(2)
        .position(|w| w[0] < 0.0 && w[1] >= 0.0)
        .unwrap_or(0)
}

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], window: usize) {
    let start = trigger(&samples[..samples.len().saturating_sub(window)]);
    let shown = &samples[start..(start + window).min(samples.len())];
    let peak = shown.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));

    let block = Block::default()
        .title(format!(" scope  peak {peak:.2} "))
        .borders(Borders::ALL);

    let data: Vec<(f64, f64)> = shown
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, window as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_finds_rising_edge() {
        assert_eq!(trigger(&[0.5, -0.2, -0.1, 0.3, 0.4]), 2);
        assert_eq!(trigger(&[0.1, 0.2]), 0);
        assert_eq!(trigger(&[]), 0);
    }
}
