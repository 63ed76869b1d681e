use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use crate::store::MetricsStore;
use crate::store::schema::{MetricsHistoryData, MetricsSnapshot};

/// Fixed storage key of the metrics history.
pub const METRICS_FILE: &str = "typing_test_metrics.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typeline");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Missing, unreadable, corrupt or wrong-version files all read as an
    /// empty history.
    pub fn load_history(&self) -> MetricsHistoryData {
        let path = self.file_path(METRICS_FILE);
        if !path.exists() {
            return MetricsHistoryData::default();
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, "metrics history unreadable");
                return MetricsHistoryData::default();
            }
        };
        match serde_json::from_str::<MetricsHistoryData>(&content) {
            Ok(data) if !data.needs_reset() => data,
            Ok(data) => {
                warn!(version = data.schema_version, "metrics history has unknown schema");
                MetricsHistoryData::default()
            }
            Err(err) => {
                warn!(error = %err, "metrics history corrupt, starting empty");
                MetricsHistoryData::default()
            }
        }
    }

    pub fn save_history(&self, data: &MetricsHistoryData) -> Result<()> {
        self.save(METRICS_FILE, data)
    }
}

impl MetricsStore for JsonStore {
    fn append(&self, snapshot: MetricsSnapshot) -> Result<()> {
        let mut data = self.load_history();
        data.snapshots.push(snapshot);
        self.save_history(&data)
    }

    fn load(&self) -> Vec<MetricsSnapshot> {
        self.load_history().snapshots
    }

    fn clear(&self) -> Result<()> {
        let path = self.file_path(METRICS_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::metrics::Metrics;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn snapshot(wpm: u32) -> MetricsSnapshot {
        MetricsSnapshot::new(
            Metrics {
                wpm,
                accuracy: 90,
                correct_chars: 9,
                total_chars: 10,
            },
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let (_dir, store) = make_test_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let (_dir, store) = make_test_store();
        store.append(snapshot(30)).unwrap();
        store.append(snapshot(45)).unwrap();
        let wpms: Vec<u32> = store.load().iter().map(|s| s.wpm).collect();
        assert_eq!(wpms, vec![30, 45]);
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_recovers() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(METRICS_FILE), "{not json").unwrap();
        assert!(store.load().is_empty());

        store.append(snapshot(50)).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_unknown_schema_reads_empty() {
        let (_dir, store) = make_test_store();
        fs::write(
            store.file_path(METRICS_FILE),
            r#"{"schema_version": 99, "snapshots": []}"#,
        )
        .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_missing_char_counts_default_to_zero() {
        let (_dir, store) = make_test_store();
        fs::write(
            store.file_path(METRICS_FILE),
            r#"{"schema_version": 1, "snapshots": [{"wpm": 40, "accuracy": 97, "date": "2026-01-02T03:04:05Z"}]}"#,
        )
        .unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].correct_chars, 0);
        assert_eq!(loaded[0].total_chars, 0);
    }

    #[test]
    fn test_clear_removes_history() {
        let (_dir, store) = make_test_store();
        store.append(snapshot(30)).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert!(!store.file_path(METRICS_FILE).exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_no_tmp_file_left_after_save() {
        let (dir, store) = make_test_store();
        store.append(snapshot(30)).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }
}
