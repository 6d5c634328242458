use serde::{Deserialize, Serialize};

/// An authenticated account.
///
/// The id is the case-normalized (lowercased) email address and doubles as
/// the progress-store key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub name: String,
}

impl Principal {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
