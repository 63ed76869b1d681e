use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct TestLayout {
    pub header: Rect,
    pub preview: Rect,
    pub typing: Rect,
    pub previous: Rect,
    pub message: Rect,
    pub footer: Rect,
}

impl TestLayout {
    /// `preview_lines` rows are reserved for the queue preview; the typing
    /// box grows to fit `reference` wrapped at the available width.
    pub fn new(area: Rect, preview_lines: u16, reference: &str, footer_lines: u16) -> Self {
        // Borders plus the current-word row and its spacer.
        let inner_width = area.width.saturating_sub(2) as usize;
        let typing_height = wrapped_line_count(reference, inner_width) as u16 + 4;

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(preview_lines),
                Constraint::Length(typing_height),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        Self {
            header: vertical[0],
            preview: vertical[1],
            typing: vertical[2],
            previous: vertical[3],
            message: vertical[4],
            footer: vertical[5],
        }
    }
}

pub struct ProgressLayout {
    pub header: Rect,
    pub table: Rect,
    pub chart: Rect,
    pub footer: Rect,
}

impl ProgressLayout {
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical[1]);

        Self {
            header: vertical[0],
            table: body[0],
            chart: body[1],
            footer: vertical[2],
        }
    }
}

pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let chars = text.chars().count().max(1);
    chars.div_ceil(width)
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}
