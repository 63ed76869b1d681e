use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Widget};

use crate::store::schema::MetricsSnapshot;
use crate::ui::theme::Theme;

/// WPM and accuracy per finished test, x = run number starting at 1.
pub fn series(history: &[MetricsSnapshot]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    history
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let x = (i + 1) as f64;
            ((x, s.wpm as f64), (x, s.accuracy as f64))
        })
        .unzip()
}

pub struct ProgressChart<'a> {
    history: &'a [MetricsSnapshot],
    theme: &'a Theme,
}

impl<'a> ProgressChart<'a> {
    pub fn new(history: &'a [MetricsSnapshot], theme: &'a Theme) -> Self {
        Self { history, theme }
    }
}

impl Widget for ProgressChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" WPM / Accuracy ")
            .border_style(Style::default().fg(colors.border));

        if self.history.is_empty() {
            block.render(area, buf);
            return;
        }

        let (wpm, accuracy) = series(self.history);
        let max_x = (self.history.len() as f64).max(2.0);
        let max_y = wpm
            .iter()
            .map(|(_, y)| *y)
            .fold(100.0f64, f64::max);

        let datasets = vec![
            Dataset::default()
                .name("WPM")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.accent))
                .data(&wpm),
            Dataset::default()
                .name("Accuracy %")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.success))
                .data(&accuracy),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("Test #")
                    .style(Style::default().fg(colors.text_pending))
                    .bounds([1.0, max_x]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(colors.text_pending))
                    .bounds([0.0, max_y * 1.1])
                    .labels(vec!["0".to_string(), format!("{:.0}", max_y * 1.1)]),
            );

        chart.render(area, buf);
    }
}
