use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use serde::Deserialize;

use crate::text::filter::LineFilter;
use crate::text::{LineSource, TextError};

#[derive(Debug, Deserialize)]
struct Poem {
    #[serde(default)]
    lines: Vec<String>,
}

/// Random poem lines from a PoetryDB-style `/random` endpoint.
pub struct RemoteSource {
    url: String,
    timeout: Duration,
    filter: LineFilter,
}

impl RemoteSource {
    pub fn new(url: &str, timeout: Duration, min_words: usize) -> Self {
        Self {
            url: url.to_string(),
            timeout,
            filter: LineFilter::new(min_words),
        }
    }

    #[cfg(feature = "network")]
    fn fetch_body(&self) -> Result<String, TextError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TextError::SourceUnavailable(e.to_string()))?;
        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| TextError::SourceUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(TextError::SourceUnavailable(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }
        response
            .text()
            .map_err(|e| TextError::SourceUnavailable(e.to_string()))
    }

    #[cfg(not(feature = "network"))]
    fn fetch_body(&self) -> Result<String, TextError> {
        let _ = self.timeout;
        Err(TextError::SourceUnavailable(
            "built without network support".to_string(),
        ))
    }
}

/// Lines of the first poem in a `/random` response body.
pub fn poem_lines(body: &str) -> Result<Vec<String>, TextError> {
    let poems: Vec<Poem> = serde_json::from_str(body)
        .map_err(|e| TextError::SourceUnavailable(format!("malformed response: {e}")))?;
    match poems.into_iter().next() {
        Some(poem) if !poem.lines.is_empty() => Ok(poem.lines),
        _ => Err(TextError::NoValidCandidate("invalid poem".to_string())),
    }
}

impl RemoteSource {
    /// A random valid line of the poem in `body`.
    pub fn line_from_body<R: Rng + ?Sized>(
        &self,
        body: &str,
        rng: &mut R,
    ) -> Result<String, TextError> {
        let lines = poem_lines(body)?;
        self.filter
            .pick(&lines, rng)
            .ok_or_else(|| TextError::NoValidCandidate("no valid lines".to_string()))
    }
}

impl LineSource for RemoteSource {
    fn fetch_line(&self) -> Result<String, TextError> {
        let body = self.fetch_body()?;
        self.line_from_body(&body, &mut SmallRng::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poem_lines_takes_first_poem() {
        let body = r#"[{"title":"T","author":"A","lines":["first line","second line"],"linecount":"2"}]"#;
        assert_eq!(
            poem_lines(body).unwrap(),
            vec!["first line".to_string(), "second line".to_string()]
        );
    }

    #[test]
    fn test_poem_without_lines_is_invalid() {
        assert!(matches!(
            poem_lines(r#"[{"title":"T"}]"#),
            Err(TextError::NoValidCandidate(_))
        ));
        assert!(matches!(
            poem_lines("[]"),
            Err(TextError::NoValidCandidate(_))
        ));
    }

    #[test]
    fn test_malformed_body_is_unavailable() {
        assert!(matches!(
            poem_lines("<html>oops</html>"),
            Err(TextError::SourceUnavailable(_))
        ));
    }

    fn source(min_words: usize) -> RemoteSource {
        RemoteSource::new("https://poetrydb.org/random", Duration::from_secs(1), min_words)
    }

    #[test]
    fn test_line_from_body_filters_and_cleans() {
        let body = r#"[{"lines":["Too short,","", "under_score words fill this long line", "So long lives this, and this gives life to thee."]}]"#;
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..5 {
            assert_eq!(
                source(8).line_from_body(body, &mut rng).unwrap(),
                "So long lives this, and this gives life to thee"
            );
        }
    }

    #[test]
    fn test_line_from_body_without_valid_lines() {
        let body = r#"[{"lines":["Too short,","still not enough words"]}]"#;
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(matches!(
            source(8).line_from_body(body, &mut rng),
            Err(TextError::NoValidCandidate(_))
        ));
    }

    #[test]
    fn test_error_page_is_unavailable() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(matches!(
            source(1).line_from_body("<html>503</html>", &mut rng),
            Err(TextError::SourceUnavailable(_))
        ));
    }
}
