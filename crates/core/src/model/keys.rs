use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Error type for parsing an item kind from a request payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized kind: {raw}")]
pub struct ParseKindError {
    pub raw: String,
}

//
// ─── KINDS ─────────────────────────────────────────────────────────────────────
//

/// The two kinds of catalog items that can be favorited or annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lesson,
    Project,
}

impl ItemKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Lesson => "lesson",
            ItemKind::Project => "project",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lesson" => Ok(ItemKind::Lesson),
            "project" => Ok(ItemKind::Project),
            other => Err(ParseKindError {
                raw: other.to_string(),
            }),
        }
    }
}

/// Completion-flag namespaces in a progress record.
///
/// Tasks are completable but cannot be favorited, so this is a wider set
/// than [`ItemKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressKind {
    Lesson,
    Project,
    Task,
}

impl ProgressKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressKind::Lesson => "lesson",
            ProgressKind::Project => "project",
            ProgressKind::Task => "task",
        }
    }
}

impl FromStr for ProgressKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lesson" => Ok(ProgressKind::Lesson),
            "project" => Ok(ProgressKind::Project),
            "task" => Ok(ProgressKind::Task),
            other => Err(ParseKindError {
                raw: other.to_string(),
            }),
        }
    }
}

impl From<ItemKind> for ProgressKind {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Lesson => ProgressKind::Lesson,
            ItemKind::Project => ProgressKind::Project,
        }
    }
}

//
// ─── ITEM KEY ──────────────────────────────────────────────────────────────────
//

/// Typed favorite/note key.
///
/// Persisted records store these as `"{kind}:{id}"` strings; the typed form
/// exists so lookup sites never string-parse ad hoc. Encoded keys with an
/// unrecognized kind prefix are tolerated in stored records and simply never
/// parse back, which keeps them inert for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub kind: ItemKind,
    pub id: String,
}

impl ItemKey {
    #[must_use]
    pub fn new(kind: ItemKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn lesson(id: impl Into<String>) -> Self {
        Self::new(ItemKind::Lesson, id)
    }

    #[must_use]
    pub fn project(id: impl Into<String>) -> Self {
        Self::new(ItemKind::Project, id)
    }

    /// The composite string form used inside persisted records.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }

    /// Parses a composite key, returning `None` for unrecognized prefixes
    /// or keys without a kind separator.
    #[must_use]
    pub fn parse(encoded: &str) -> Option<Self> {
        let (kind, id) = encoded.split_once(':')?;
        let kind = kind.parse().ok()?;
        if id.is_empty() {
            return None;
        }
        Some(Self::new(kind, id))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_key_round_trips() {
        let key = ItemKey::lesson("python-01");
        let encoded = key.encode();
        assert_eq!(encoded, "lesson:python-01");
        assert_eq!(ItemKey::parse(&encoded), Some(key));
    }

    #[test]
    fn unknown_prefix_is_inert() {
        assert_eq!(ItemKey::parse("bookmark:python-01"), None);
        assert_eq!(ItemKey::parse("no-separator"), None);
        assert_eq!(ItemKey::parse("lesson:"), None);
    }

    #[test]
    fn progress_kind_parses_task() {
        assert_eq!("task".parse(), Ok(ProgressKind::Task));
        assert!("bookmark".parse::<ProgressKind>().is_err());
    }

    #[test]
    fn item_kind_rejects_task() {
        assert!("task".parse::<ItemKind>().is_err());
    }
}
