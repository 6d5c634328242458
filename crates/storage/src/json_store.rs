//! File-backed progress store: one JSON snapshot per principal.
//!
//! The on-disk contract matches the persisted shape documented on
//! [`ProgressRecord`]: keys `lessons`, `projects`, `tasks`, `favorites`,
//! `notes`, `study_dates`, human-readable indented JSON. Saves go through a
//! temp-file-then-rename so a crashed write never leaves a half-written
//! record in place.

use async_trait::async_trait;
use manabi_core::model::ProgressRecord;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::repository::{FreshReason, LoadedProgress, ProgressRepository, StorageError};

/// JSON-file progress store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonProgressStore {
    dir: PathBuf,
}

impl JsonProgressStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(StorageError::Write)?;
        Ok(Self { dir })
    }

    /// Path of the record file for a principal.
    #[must_use]
    pub fn record_path(&self, principal_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", safe_file_stem(principal_id)))
    }
}

/// Maps a principal id (an email address) to a filesystem-safe file stem.
///
/// Emails are mostly safe already; anything outside a conservative character
/// set becomes `_` so ids can never traverse out of the data directory.
fn safe_file_stem(principal_id: &str) -> String {
    principal_id
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '@' | '.' | '-' | '_' | '+' => c,
            _ => '_',
        })
        .collect()
}

fn read_record(path: &Path) -> LoadedProgress {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return LoadedProgress::Fresh(FreshReason::Missing);
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "progress file unreadable, starting fresh");
            return LoadedProgress::Fresh(FreshReason::Corrupt);
        }
    };

    match serde_json::from_slice::<ProgressRecord>(&bytes) {
        Ok(record) => LoadedProgress::Existing(record),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "progress file corrupt, starting fresh");
            LoadedProgress::Fresh(FreshReason::Corrupt)
        }
    }
}

fn write_record(path: &Path, record: &ProgressRecord) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(record)?;

    // Stage next to the target so the rename stays on one filesystem.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(StorageError::Write)?;
    std::fs::rename(&tmp, path).map_err(StorageError::Write)?;
    Ok(())
}

#[async_trait]
impl ProgressRepository for JsonProgressStore {
    async fn load(&self, principal_id: &str) -> LoadedProgress {
        let path = self.record_path(principal_id);
        tokio::task::spawn_blocking(move || read_record(&path))
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "progress load task failed, starting fresh");
                LoadedProgress::Fresh(FreshReason::Corrupt)
            })
    }

    async fn save(&self, principal_id: &str, record: &ProgressRecord) -> Result<(), StorageError> {
        let path = self.record_path(principal_id);
        let record = record.clone();
        tokio::task::spawn_blocking(move || write_record(&path, &record))
            .await
            .map_err(|err| {
                StorageError::Write(std::io::Error::other(format!(
                    "progress save task failed: {err}"
                )))
            })?
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
