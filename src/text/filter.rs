use rand::Rng;
use rand::seq::SliceRandom;

/// Characters removed anywhere in a candidate: zero-width space/joiners,
/// byte-order mark, no-break space.
const INVISIBLE: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '\u{00A0}'];

pub struct LineFilter {
    pub min_words: usize,
}

impl LineFilter {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    /// Invisible formatting characters are ignored; `clean_text` drops them.
    pub fn is_valid(&self, line: &str) -> bool {
        let visible = strip_invisible(line);
        !visible.trim().is_empty()
            && !visible.contains('_')
            && is_latin(&visible)
            && word_count(&visible) >= self.min_words
    }

    /// Pick a random valid candidate and return it cleaned.
    pub fn pick<R: Rng + ?Sized>(&self, candidates: &[String], rng: &mut R) -> Option<String> {
        let valid: Vec<&String> = candidates.iter().filter(|l| self.is_valid(l)).collect();
        valid.choose(rng).map(|line| clean_text(line))
    }
}

pub fn is_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic()) && text.is_ascii()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// ASCII members of the Unicode punctuation categories. Symbols such as
/// `$`, `+` or `|` are not punctuation.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '!' | '"'
            | '#'
            | '%'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | ','
            | '-'
            | '.'
            | '/'
            | ':'
            | ';'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '_'
            | '{'
            | '}'
    )
}

fn strip_invisible(text: &str) -> String {
    text.chars().filter(|c| !INVISIBLE.contains(c)).collect()
}

pub fn clean_text(text: &str) -> String {
    strip_invisible(text)
        .trim()
        .trim_matches(is_punctuation)
        .trim()
        .to_string()
}
