use async_trait::async_trait;
use manabi_core::model::ProgressRecord;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
///
/// Note that a missing or unreadable record is *not* an error: loads fail
/// open to an empty record (see [`LoadedProgress`]). Errors here are for
/// save-side failures, where losing a write must not be silent.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to write progress record: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize progress record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a load produced a fresh record instead of a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshReason {
    /// No record has ever been saved for this principal.
    Missing,
    /// A record exists but could not be read or parsed.
    Corrupt,
}

/// Result of loading a principal's progress.
///
/// The corrupt/missing branch is a deliberate typed variant rather than an
/// error: first use and a damaged file both degrade to an empty record, and
/// callers that care (logging, tests) can still tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedProgress {
    Existing(ProgressRecord),
    Fresh(FreshReason),
}

impl LoadedProgress {
    /// The usable record, empty when fresh.
    #[must_use]
    pub fn into_record(self) -> ProgressRecord {
        match self {
            LoadedProgress::Existing(record) => record,
            LoadedProgress::Fresh(_) => ProgressRecord::empty(),
        }
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        matches!(self, LoadedProgress::Fresh(_))
    }
}

/// Repository contract for per-principal progress records.
///
/// Implementations store whole records: every mutation is expected to be a
/// full `load` → mutate → `save` cycle. The repository itself does not
/// coordinate concurrent writers for the same principal; callers that need
/// that hold a per-principal lock around the cycle.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the record for a principal.
    ///
    /// Never fails: missing or unreadable records come back as
    /// [`LoadedProgress::Fresh`].
    async fn load(&self, principal_id: &str) -> LoadedProgress;

    /// Persist the full record for a principal, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be serialized or written.
    async fn save(&self, principal_id: &str, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    records: Arc<Mutex<HashMap<String, ProgressRecord>>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressStore {
    async fn load(&self, principal_id: &str) -> LoadedProgress {
        let guard = self.records.lock().expect("progress map poisoned");
        match guard.get(principal_id) {
            Some(record) => LoadedProgress::Existing(record.clone()),
            None => LoadedProgress::Fresh(FreshReason::Missing),
        }
    }

    async fn save(&self, principal_id: &str, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self.records.lock().expect("progress map poisoned");
        guard.insert(principal_id.to_string(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manabi_core::model::ProgressKind;

    #[tokio::test]
    async fn missing_record_loads_fresh() {
        let store = InMemoryProgressStore::new();
        let loaded = store.load("user@example.com").await;
        assert_eq!(loaded, LoadedProgress::Fresh(FreshReason::Missing));
        assert_eq!(loaded.into_record(), ProgressRecord::empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryProgressStore::new();
        let mut record = ProgressRecord::empty();
        record.toggle(ProgressKind::Lesson, "python-01");

        store.save("user@example.com", &record).await.unwrap();

        let loaded = store.load("user@example.com").await;
        assert_eq!(loaded, LoadedProgress::Existing(record));
    }

    #[tokio::test]
    async fn records_are_keyed_per_principal() {
        let store = InMemoryProgressStore::new();
        let mut record = ProgressRecord::empty();
        record.toggle(ProgressKind::Task, "task-responsive");
        store.save("a@example.com", &record).await.unwrap();

        assert!(store.load("b@example.com").await.is_fresh());
    }
}
