use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_embed::Embed;

use crate::text::filter::LineFilter;
use crate::text::{LineSource, TextError};

#[derive(Embed)]
#[folder = "assets/texts/"]
struct TextAssets;

const BUNDLED_FILE: &str = "lines.json";

/// Offline candidate list: a user JSON file when configured, otherwise the
/// bundled one.
pub struct LocalSource {
    path: Option<PathBuf>,
    filter: LineFilter,
}

impl LocalSource {
    pub fn new(path: Option<PathBuf>, min_words: usize) -> Self {
        Self {
            path,
            filter: LineFilter::new(min_words),
        }
    }

    fn read_candidates(&self) -> Result<String, TextError> {
        match &self.path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                TextError::SourceUnavailable(format!("{}: {e}", path.display()))
            }),
            None => {
                let file = TextAssets::get(BUNDLED_FILE).ok_or_else(|| {
                    TextError::SourceUnavailable(format!("missing bundled {BUNDLED_FILE}"))
                })?;
                String::from_utf8(file.data.into_owned())
                    .map_err(|e| TextError::SourceUnavailable(e.to_string()))
            }
        }
    }

    pub fn candidates(&self) -> Result<Vec<String>, TextError> {
        let content = self.read_candidates()?;
        serde_json::from_str(&content)
            .map_err(|e| TextError::SourceUnavailable(format!("malformed text list: {e}")))
    }
}

impl LineSource for LocalSource {
    fn fetch_line(&self) -> Result<String, TextError> {
        let candidates = self.candidates()?;
        let mut rng = SmallRng::from_entropy();
        self.filter
            .pick(&candidates, &mut rng)
            .ok_or_else(|| TextError::NoValidCandidate("no valid local texts".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::filter::word_count;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_list_yields_valid_lines() {
        let source = LocalSource::new(None, 8);
        let candidates = source.candidates().unwrap();
        assert!(candidates.len() >= 3);
        for _ in 0..20 {
            let line = source.fetch_line().unwrap();
            assert!(word_count(&line) >= 8);
            assert!(line.is_ascii());
            assert!(!line.contains('_'));
        }
    }

    #[test]
    fn test_user_file_overrides_bundled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mine.json");
        fs::write(&path, r#"["a b c d e f g h.", "x_y"]"#).unwrap();
        let source = LocalSource::new(Some(path), 8);
        assert_eq!(source.fetch_line().unwrap(), "a b c d e f g h");
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = LocalSource::new(Some(dir.path().join("absent.json")), 8);
        assert!(matches!(
            source.fetch_line(),
            Err(TextError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_no_valid_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"["short", "under_score line with many words in it ok"]"#).unwrap();
        let source = LocalSource::new(Some(path), 8);
        assert!(matches!(
            source.fetch_line(),
            Err(TextError::NoValidCandidate(_))
        ));
    }
}
