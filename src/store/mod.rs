pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::store::schema::MetricsSnapshot;

/// Append-only history of finished tests.
pub trait MetricsStore {
    fn append(&self, snapshot: MetricsSnapshot) -> Result<()>;
    /// Empty when nothing is stored or the stored data is unreadable.
    fn load(&self) -> Vec<MetricsSnapshot>;
    fn clear(&self) -> Result<()>;
}
