use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::metrics::Metrics;

pub const SCHEMA_VERSION: u32 = 1;

/// One finished test as persisted in the progress history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub wpm: u32,
    pub accuracy: u32,
    #[serde(default)]
    pub correct_chars: usize,
    #[serde(default)]
    pub total_chars: usize,
    pub date: DateTime<Utc>,
}

impl MetricsSnapshot {
    pub fn new(metrics: Metrics, date: DateTime<Utc>) -> Self {
        Self {
            wpm: metrics.wpm,
            accuracy: metrics.accuracy,
            correct_chars: metrics.correct_chars,
            total_chars: metrics.total_chars,
            date,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsHistoryData {
    pub schema_version: u32,
    pub snapshots: Vec<MetricsSnapshot>,
}

impl Default for MetricsHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            snapshots: Vec::new(),
        }
    }
}

impl MetricsHistoryData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
