#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
}

/// Length jumps above this between two samples are treated as a desync.
pub const RESYNC_THRESHOLD: usize = 1;

/// One sample of the raw input field.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub raw: &'a str,
    /// The change came from a Backspace key press.
    pub backspace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Typed,
    LineComplete,
    Deleted,
    NavigateBack,
    /// Would run past the reference; raw field must be reset.
    Overflow,
    /// Raw field disagrees with the accepted buffer by more than one char.
    Resync,
    NoOp,
}

impl InputAction {
    /// Whether the raw snapshot becomes the new accepted buffer.
    pub fn accepts_raw(self) -> bool {
        matches!(
            self,
            InputAction::Typed | InputAction::LineComplete | InputAction::Deleted
        )
    }
}

pub fn classify(
    accepted: &str,
    snapshot: Snapshot<'_>,
    reference: &str,
    can_go_back: bool,
) -> InputAction {
    let old_len = accepted.chars().count();
    let new_len = snapshot.raw.chars().count();
    let reference_len = reference.chars().count();

    if snapshot.backspace && new_len == 0 && old_len == 0 {
        return if can_go_back {
            InputAction::NavigateBack
        } else {
            InputAction::NoOp
        };
    }

    if new_len > reference_len {
        return InputAction::Overflow;
    }

    if new_len.abs_diff(old_len) > RESYNC_THRESHOLD {
        return InputAction::Resync;
    }

    match new_len.cmp(&old_len) {
        std::cmp::Ordering::Greater if new_len == reference_len => InputAction::LineComplete,
        std::cmp::Ordering::Greater => InputAction::Typed,
        std::cmp::Ordering::Less => InputAction::Deleted,
        std::cmp::Ordering::Equal => InputAction::NoOp,
    }
}

/// The input restored when backspacing across a line boundary: the crossing
/// keystroke consumes the last character.
pub fn trim_last(input: &str) -> String {
    let mut trimmed = input.to_string();
    trimmed.pop();
    trimmed
}

pub fn compare(reference: &str, typed: &str) -> Vec<CharStatus> {
    reference
        .chars()
        .zip(typed.chars())
        .map(|(expected, actual)| {
            if expected == actual {
                CharStatus::Correct
            } else {
                CharStatus::Incorrect(actual)
            }
        })
        .collect()
}
