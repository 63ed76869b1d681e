use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::ui::components::typing_area::styled_spans;
use crate::ui::theme::Theme;

/// Recap of the most recently completed line.
pub struct PreviousLine<'a> {
    previous: Option<(&'a str, &'a str)>,
    theme: &'a Theme,
}

impl<'a> PreviousLine<'a> {
    pub fn new(previous: Option<(&'a str, &'a str)>, theme: &'a Theme) -> Self {
        Self { previous, theme }
    }
}

impl Widget for PreviousLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some((reference, typed)) = self.previous else {
            return;
        };

        let line = Line::from(styled_spans(reference, typed, colors, false));
        Paragraph::new(line)
            .style(Style::default().bg(colors.bg))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
