//! Progress read-modify-write cycles.
//!
//! Every mutation is load → mutate → save against a whole-record store. Two
//! requests for the same principal would otherwise race on the rewrite with
//! the later save silently winning, so each cycle holds a per-principal
//! mutex from a lock arena. That mutual exclusion is an internal detail;
//! the API shape stays plain read/mutate calls.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use manabi_core::Clock;
use manabi_core::model::{ItemKey, ProgressKind, ProgressRecord};
use storage::repository::ProgressRepository;

use crate::error::ProgressServiceError;

/// Principal-keyed progress operations over an injected repository.
pub struct ProgressService {
    store: Arc<dyn ProgressRepository>,
    clock: Clock,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn ProgressRepository>) -> Self {
        Self {
            store,
            clock,
            locks: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    fn principal_lock(&self, principal_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut arena = self.locks.lock().expect("lock arena poisoned");
        Arc::clone(
            arena
                .entry(principal_id.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
        )
    }

    /// Read-only snapshot of a principal's progress.
    pub async fn snapshot(&self, principal_id: &str) -> ProgressRecord {
        self.store.load(principal_id).await.into_record()
    }

    /// One guarded load → mutate → save cycle.
    async fn update<T>(
        &self,
        principal_id: &str,
        mutate: impl FnOnce(&mut ProgressRecord) -> T,
    ) -> Result<T, ProgressServiceError> {
        let lock = self.principal_lock(principal_id);
        let _guard = lock.lock().await;

        let mut record = self.store.load(principal_id).await.into_record();
        let out = mutate(&mut record);
        self.store.save(principal_id, &record).await?;
        Ok(out)
    }

    /// Flips a completion flag and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` when the save fails.
    pub async fn toggle(
        &self,
        principal_id: &str,
        kind: ProgressKind,
        item_id: &str,
    ) -> Result<bool, ProgressServiceError> {
        let completed = self
            .update(principal_id, |record| record.toggle(kind, item_id))
            .await?;
        debug!(principal = principal_id, kind = kind.as_str(), item_id, completed, "toggled progress");
        Ok(completed)
    }

    /// Adds or removes a favorite, returning whether it is set afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` when the save fails.
    pub async fn toggle_favorite(
        &self,
        principal_id: &str,
        key: &ItemKey,
    ) -> Result<bool, ProgressServiceError> {
        self.update(principal_id, |record| record.toggle_favorite(key))
            .await
    }

    /// Stores or removes a note (whitespace-only text removes it).
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` when the save fails.
    pub async fn save_note(
        &self,
        principal_id: &str,
        key: &ItemKey,
        text: &str,
    ) -> Result<(), ProgressServiceError> {
        self.update(principal_id, |record| record.set_note(key, text))
            .await
    }

    /// Records study activity for today and returns the refreshed record.
    ///
    /// The dashboard calls this on every render: viewing the dashboard
    /// deliberately counts as studying today.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` when the save fails.
    pub async fn record_study_today(
        &self,
        principal_id: &str,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let today = self.clock.today();
        self.update(principal_id, |record| {
            record.record_study(today);
            record.clone()
        })
        .await
    }

    /// Current streak for a principal as of the clock's today.
    pub async fn streak(&self, principal_id: &str) -> u32 {
        self.snapshot(principal_id).await.streak(self.clock.today())
    }

    /// Today according to the service clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
