use serde::{Deserialize, Serialize};

use crate::session::history::SessionHistory;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct_chars: usize,
    pub total_chars: usize,
}

/// Position-wise comparison of `typed` against `reference`. WPM counts five
/// correct characters as a word; zero elapsed time yields zero WPM.
pub fn calculate_metrics(typed: &str, reference: &str, elapsed_secs: f64) -> Metrics {
    let mut reference_chars = reference.chars();
    let mut correct_chars = 0;
    let mut total_chars = 0;
    for ch in typed.chars() {
        if reference_chars.next() == Some(ch) {
            correct_chars += 1;
        }
        total_chars += 1;
    }

    let wpm = if elapsed_secs > 0.0 {
        ((correct_chars as f64 / 5.0 / elapsed_secs) * 60.0).round() as u32
    } else {
        0
    };
    let accuracy = if total_chars > 0 {
        ((correct_chars as f64 / total_chars as f64) * 100.0).round() as u32
    } else {
        0
    };

    Metrics {
        wpm,
        accuracy,
        correct_chars,
        total_chars,
    }
}

/// Metrics over every completed line plus the line in progress, joined by
/// single spaces.
pub fn session_metrics(
    history: &SessionHistory,
    reference: &str,
    typed: &str,
    elapsed_secs: f64,
) -> Metrics {
    let all_typed = join_with(history.inputs(), typed);
    let all_references = join_with(history.references(), reference);
    calculate_metrics(&all_typed, &all_references, elapsed_secs)
}

fn join_with(completed: &[String], current: &str) -> String {
    let mut parts: Vec<&str> = completed.iter().map(String::as_str).collect();
    parts.push(current);
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_hallo() {
        let m = calculate_metrics("hello", "hallo", 60.0);
        assert_eq!(m.correct_chars, 4);
        assert_eq!(m.total_chars, 5);
        assert_eq!(m.accuracy, 80);
        assert_eq!(m.wpm, 1);
    }

    #[test]
    fn test_nothing_typed() {
        assert_eq!(calculate_metrics("", "hallo", 10.0), Metrics::default());
    }

    #[test]
    fn test_zero_elapsed_has_zero_wpm() {
        let m = calculate_metrics("abc", "abc", 0.0);
        assert_eq!(m.wpm, 0);
        assert_eq!(m.accuracy, 100);
    }

    #[test]
    fn test_typed_past_reference_counts_as_wrong() {
        let m = calculate_metrics("abcd", "abc", 60.0);
        assert_eq!(m.correct_chars, 3);
        assert_eq!(m.total_chars, 4);
        assert_eq!(m.accuracy, 75);
    }

    #[test]
    fn test_session_metrics_joins_lines() {
        let mut history = SessionHistory::new();
        history.save_current_line("the cat".to_string(), "the cat".to_string());
        // "the cat" + " " + "sa" against "the cat" + " " + "sat"
        let m = session_metrics(&history, "sat", "sa", 30.0);
        assert_eq!(m.total_chars, 10);
        assert_eq!(m.correct_chars, 10);
        assert_eq!(m.wpm, 4);
        assert_eq!(m.accuracy, 100);
    }

    #[test]
    fn test_fifty_wpm() {
        let text = "a".repeat(250);
        let m = calculate_metrics(&text, &text, 60.0);
        assert_eq!(m.wpm, 50);
    }
}
