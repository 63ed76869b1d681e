use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::input::{self, CharStatus};
use crate::ui::theme::{Palette, Theme};

pub struct TypingArea<'a> {
    reference: &'a str,
    typed: &'a str,
    placeholder: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(reference: &'a str, typed: &'a str, theme: &'a Theme) -> Self {
        Self {
            reference,
            typed,
            placeholder: None,
            theme,
        }
    }

    /// Shown instead of the reference while it is empty.
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = Some(text);
        self
    }
}

/// Reference characters styled against what has been typed so far. Typed
/// mistakes show the character actually entered.
pub fn styled_spans<'s>(
    reference: &str,
    typed: &str,
    colors: &Palette,
    show_cursor: bool,
) -> Vec<Span<'s>> {
    let statuses = input::compare(reference, typed);
    let cursor = statuses.len();

    reference
        .chars()
        .enumerate()
        .map(|(idx, expected)| match statuses.get(idx) {
            Some(CharStatus::Correct) => {
                Span::styled(expected.to_string(), Style::default().fg(colors.text_correct))
            }
            Some(CharStatus::Incorrect(actual)) => {
                // A mistyped space would be invisible.
                let shown = if *actual == ' ' { '_' } else { *actual };
                Span::styled(
                    shown.to_string(),
                    Style::default()
                        .fg(colors.text_incorrect)
                        .bg(colors.text_incorrect_bg)
                        .add_modifier(Modifier::UNDERLINED),
                )
            }
            None if show_cursor && idx == cursor => Span::styled(
                expected.to_string(),
                Style::default()
                    .fg(colors.text_cursor_fg)
                    .bg(colors.text_cursor_bg),
            ),
            None => Span::styled(expected.to_string(), Style::default().fg(colors.text_pending)),
        })
        .collect()
}

/// The reference word the cursor sits in, or the next word when the cursor
/// is on a space.
pub fn current_word(reference: &str, typed: &str) -> Option<String> {
    let chars: Vec<char> = reference.chars().collect();
    let mut cursor = typed.chars().count();
    if cursor >= chars.len() {
        return None;
    }
    while cursor < chars.len() && chars[cursor].is_whitespace() {
        cursor += 1;
    }
    if cursor >= chars.len() {
        return None;
    }
    let start = chars[..cursor]
        .iter()
        .rposition(|c| c.is_whitespace())
        .map_or(0, |p| p + 1);
    let end = chars[cursor..]
        .iter()
        .position(|c| c.is_whitespace())
        .map_or(chars.len(), |p| cursor + p);
    Some(chars[start..end].iter().collect())
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut lines = Vec::new();
        if self.reference.is_empty() {
            let text = self.placeholder.unwrap_or_default();
            lines.push(Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(colors.text_pending),
            )));
        } else {
            lines.push(Line::from(styled_spans(
                self.reference,
                self.typed,
                colors,
                true,
            )));
            if let Some(word) = current_word(self.reference, self.typed) {
                lines.push(Line::default());
                lines.push(Line::from(vec![
                    Span::styled("word: ", Style::default().fg(colors.text_pending)),
                    Span::styled(
                        word,
                        Style::default()
                            .fg(colors.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
        }

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });

        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Palette {
        Palette::default()
    }

    #[test]
    fn test_spans_cover_whole_reference() {
        let spans = styled_spans("abc", "a", &colors(), true);
        assert_eq!(spans.len(), 3);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_spans_show_typed_mistake() {
        let c = colors();
        let spans = styled_spans("abc", "ax", &c, true);
        assert_eq!(spans[1].content, "x");
        assert_eq!(spans[1].style.fg, Some(c.text_incorrect));
        assert_eq!(spans[0].style.fg, Some(c.text_correct));
    }

    #[test]
    fn test_cursor_only_when_requested() {
        let c = colors();
        let with_cursor = styled_spans("abc", "a", &c, true);
        assert_eq!(with_cursor[1].style.bg, Some(c.text_cursor_bg));
        let without = styled_spans("abc", "a", &c, false);
        assert_eq!(without[1].style.fg, Some(c.text_pending));
        assert_eq!(without[1].style.bg, None);
    }

    #[test]
    fn test_mistyped_space_is_visible() {
        let spans = styled_spans("ab", "a ", &colors(), false);
        assert_eq!(spans[1].content, "_");
    }

    #[test]
    fn test_current_word() {
        assert_eq!(current_word("the quick fox", ""), Some("the".to_string()));
        assert_eq!(current_word("the quick fox", "the q"), Some("quick".to_string()));
        // On the space: the upcoming word.
        assert_eq!(current_word("the quick fox", "the"), Some("quick".to_string()));
        assert_eq!(current_word("the quick fox", "the quick fox"), None);
        assert_eq!(current_word("", ""), None);
    }
}
