//! File-backed tracing setup.
//!
//! The terminal belongs to the UI while a test runs, so every event goes to
//! the log file and nothing is written to stdout or stderr. `RUST_LOG`
//! overrides the configured level.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to open log file: {0}")]
    FileCreate(#[from] io::Error),

    #[error("failed to set global subscriber: {0}")]
    SetSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init_logging(level: &str, path: &Path) -> Result<(), LogError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let subscriber = tracing_subscriber::registry().with(env_filter(level)).with(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_target(true)
            .with_ansi(false),
    );
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(log_level = level, log_file = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct CaptureWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CaptureWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn configured_level_filters_events() {
        let writer = CaptureWriter {
            buffer: Arc::new(Mutex::new(Vec::new())),
        };
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("warn"))
            .with(fmt::layer().with_writer(writer.clone()).with_ansi(false));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("quiet");
            tracing::warn!(attempt = 3, "loud");
        });

        let out = String::from_utf8(writer.buffer.lock().unwrap().clone()).unwrap();
        assert!(out.contains("loud"));
        assert!(out.contains("attempt=3"));
        assert!(!out.contains("quiet"));
    }

    #[test]
    fn log_error_display() {
        let err = LogError::FileCreate(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "failed to open log file: denied");
    }
}
