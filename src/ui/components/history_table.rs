use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::MetricsSnapshot;
use crate::ui::theme::Theme;

pub struct HistoryTable<'a> {
    history: &'a [MetricsSnapshot],
    theme: &'a Theme,
}

impl<'a> HistoryTable<'a> {
    pub fn new(history: &'a [MetricsSnapshot], theme: &'a Theme) -> Self {
        Self { history, theme }
    }
}

/// `true` for every run whose WPM beat the run before it. The first run has
/// nothing to beat.
pub fn improved_rows(history: &[MetricsSnapshot]) -> Vec<bool> {
    let mut improved = Vec::with_capacity(history.len());
    for (i, snapshot) in history.iter().enumerate() {
        improved.push(i > 0 && snapshot.wpm > history[i - 1].wpm);
    }
    improved
}

impl Widget for HistoryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                " Progress ",
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No finished tests yet.",
                Style::default().fg(colors.text_pending),
            )))
            .render(inner, buf);
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                "     #     WPM    Acc%    Correct/Total    Date",
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  ──────────────────────────────────────────────────────",
                Style::default().fg(colors.border),
            )),
        ];

        let improved = improved_rows(self.history);
        let visible = (inner.height as usize).saturating_sub(lines.len());

        // Newest first.
        for (idx, snapshot) in self.history.iter().enumerate().rev().take(visible) {
            let marker = if improved[idx] { "+" } else { " " };
            let chars = format!("{}/{}", snapshot.correct_chars, snapshot.total_chars);
            let row = format!(
                " {marker}{num:>4}  {wpm:>6}  {acc:>5}%    {chars:>13}    {date}",
                num = idx + 1,
                wpm = snapshot.wpm,
                acc = snapshot.accuracy,
                date = snapshot.date.format("%m/%d %H:%M"),
            );
            let style = if improved[idx] {
                Style::default()
                    .fg(colors.success)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg)
            };
            lines.push(Line::from(Span::styled(row, style)));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(wpm: u32) -> MetricsSnapshot {
        MetricsSnapshot {
            wpm,
            accuracy: 95,
            correct_chars: 0,
            total_chars: 0,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_improved_rows() {
        let history = vec![snapshot(30), snapshot(35), snapshot(35), snapshot(20), snapshot(40)];
        assert_eq!(improved_rows(&history), vec![false, true, false, false, true]);
    }

    #[test]
    fn test_improved_rows_empty() {
        assert!(improved_rows(&[]).is_empty());
    }
}
