use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

/// Upcoming lines stacked above the current one, furthest on top.
pub struct QueuePreview<'a> {
    upcoming: &'a [String],
    theme: &'a Theme,
}

impl<'a> QueuePreview<'a> {
    pub fn new(upcoming: &'a [String], theme: &'a Theme) -> Self {
        Self { upcoming, theme }
    }
}

/// Display order top to bottom with each line's color. Only the line right
/// after the current one gets the near color.
pub fn preview_rows<'s>(upcoming: &'s [String], near: Color, far: Color) -> Vec<(&'s str, Color)> {
    upcoming
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, line)| (line.as_str(), if idx == 0 { near } else { far }))
        .collect()
}

impl Widget for QueuePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rows = preview_rows(self.upcoming, colors.queue_near, colors.queue_far);

        // Bottom-align so the nearest line sits just above the typing area.
        let pad = (area.height as usize).saturating_sub(rows.len());
        let mut lines: Vec<Line> = vec![Line::default(); pad];
        lines.extend(
            rows.into_iter()
                .map(|(text, color)| Line::from(Span::styled(text, Style::default().fg(color)))),
        );

        Paragraph::new(lines)
            .style(Style::default().bg(colors.bg))
            .render(area, buf);
    }
}
