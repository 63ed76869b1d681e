pub mod filter;
pub mod local;
pub mod remote;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::text::filter::word_count;
use crate::text::local::LocalSource;
use crate::text::remote::RemoteSource;

/// Last resort when every source fails.
pub const DEFAULT_TEXT: &str = "The quick brown fox jumps over the lazy dog again and again";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("no valid candidate line: {0}")]
    NoValidCandidate(String),
}

pub trait LineSource: Send + Sync {
    fn fetch_line(&self) -> Result<String, TextError>;
}

/// Remote source first, local list on failure, `DEFAULT_TEXT` after
/// `max_attempts` rounds without a line of at least `min_words` words.
pub struct RandomText {
    remote: Option<Box<dyn LineSource>>,
    local: Box<dyn LineSource>,
    min_words: usize,
    max_attempts: usize,
}

impl RandomText {
    pub fn new(
        remote: Option<Box<dyn LineSource>>,
        local: Box<dyn LineSource>,
        min_words: usize,
        max_attempts: usize,
    ) -> Self {
        Self {
            remote,
            local,
            min_words,
            max_attempts,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let remote: Option<Box<dyn LineSource>> = if config.remote_enabled {
            Some(Box::new(RemoteSource::new(
                &config.remote_url,
                config.request_timeout(),
                config.min_words,
            )))
        } else {
            None
        };
        let local = LocalSource::new(config.local_texts_path.clone(), config.min_words);
        Self::new(remote, Box::new(local), config.min_words, config.max_attempts)
    }

    fn attempt(&self) -> Result<String, TextError> {
        match &self.remote {
            Some(remote) => remote.fetch_line().or_else(|err| {
                debug!(error = %err, "remote text failed, trying local list");
                self.local.fetch_line()
            }),
            None => self.local.fetch_line(),
        }
    }

    /// Never fails.
    pub fn fetch_random_text(&self) -> String {
        for attempt in 1..=self.max_attempts {
            match self.attempt() {
                Ok(text) if word_count(&text) >= self.min_words => return text,
                Ok(text) => debug!(attempt, words = word_count(&text), "text too short"),
                Err(err) => warn!(attempt, error = %err, "all text sources failed"),
            }
        }
        warn!("using default text");
        DEFAULT_TEXT.to_string()
    }
}

impl LineSource for RandomText {
    fn fetch_line(&self) -> Result<String, TextError> {
        Ok(self.fetch_random_text())
    }
}
