use std::path::PathBuf;
use std::sync::Arc;

use manabi_core::Catalog;
use services::{CredentialStore, ProgressService};

use crate::session::SessionSigner;

/// Shared state behind every handler.
///
/// The catalog is immutable and read lock-free; everything else is its own
/// synchronization domain.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub progress: Arc<ProgressService>,
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: Arc<SessionSigner>,
    /// Directory holding `{lesson-id}.md` / `{project-id}.md` content files.
    pub lessons_dir: PathBuf,
}
