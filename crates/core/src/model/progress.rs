use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::keys::{ItemKey, ProgressKind};

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Per-account learning progress.
///
/// One record exists per principal and is persisted as a whole-file JSON
/// snapshot: every mutation is a full load → mutate → save cycle. The record
/// never validates item ids against the catalog; stale or foreign ids stay
/// in the maps and views simply ignore them.
///
/// `favorites` and `notes` are keyed by the encoded [`ItemKey`] form
/// (`"lesson:python-01"`). Keys with prefixes the presentation layer does
/// not recognize are kept verbatim so they survive round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub lessons: BTreeMap<String, bool>,
    #[serde(default)]
    pub projects: BTreeMap<String, bool>,
    #[serde(default)]
    pub tasks: BTreeMap<String, bool>,
    #[serde(default)]
    pub favorites: BTreeSet<String>,
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
    #[serde(default)]
    pub study_dates: BTreeSet<NaiveDate>,
}

impl ProgressRecord {
    /// A record with all containers empty, used for first access and as the
    /// fail-open default when a stored record cannot be read.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn namespace_mut(&mut self, kind: ProgressKind) -> &mut BTreeMap<String, bool> {
        match kind {
            ProgressKind::Lesson => &mut self.lessons,
            ProgressKind::Project => &mut self.projects,
            ProgressKind::Task => &mut self.tasks,
        }
    }

    #[must_use]
    fn namespace(&self, kind: ProgressKind) -> &BTreeMap<String, bool> {
        match kind {
            ProgressKind::Lesson => &self.lessons,
            ProgressKind::Project => &self.projects,
            ProgressKind::Task => &self.tasks,
        }
    }

    /// Whether the item is marked completed. Absent entries read as false.
    #[must_use]
    pub fn is_completed(&self, kind: ProgressKind, item_id: &str) -> bool {
        self.namespace(kind).get(item_id).copied().unwrap_or(false)
    }

    /// Flips the completion flag for an item and returns the new state.
    pub fn toggle(&mut self, kind: ProgressKind, item_id: &str) -> bool {
        let map = self.namespace_mut(kind);
        let next = !map.get(item_id).copied().unwrap_or(false);
        map.insert(item_id.to_string(), next);
        next
    }

    /// Whether the item is currently favorited.
    #[must_use]
    pub fn is_favorite(&self, key: &ItemKey) -> bool {
        self.favorites.contains(&key.encode())
    }

    /// Adds or removes a favorite and returns whether it is set afterwards.
    pub fn toggle_favorite(&mut self, key: &ItemKey) -> bool {
        let encoded = key.encode();
        if self.favorites.remove(&encoded) {
            false
        } else {
            self.favorites.insert(encoded);
            true
        }
    }

    /// The stored note for an item, if any.
    #[must_use]
    pub fn note(&self, key: &ItemKey) -> Option<&str> {
        self.notes.get(&key.encode()).map(String::as_str)
    }

    /// Stores a note, trimming surrounding whitespace.
    ///
    /// An empty or whitespace-only note removes the entry; "no note" is
    /// always represented by absence, never by an empty string.
    pub fn set_note(&mut self, key: &ItemKey, text: &str) {
        let trimmed = text.trim();
        let encoded = key.encode();
        if trimmed.is_empty() {
            self.notes.remove(&encoded);
        } else {
            self.notes.insert(encoded, trimmed.to_string());
        }
    }

    /// Records study activity for a calendar day. Idempotent.
    pub fn record_study(&mut self, date: NaiveDate) {
        self.study_dates.insert(date);
    }

    /// Number of consecutive study days ending at `today` or yesterday.
    ///
    /// Walks the recorded dates from most recent to oldest. The first date
    /// may be `today` or `today - 1` (studying yesterday keeps the streak
    /// alive until the end of today); after that, every date must be exactly
    /// one day before the previous one. The first gap stops the scan.
    #[must_use]
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut streak = 0u32;
        let mut cursor = today;
        for &date in self.study_dates.iter().rev() {
            let matches = date == cursor || (streak == 0 && Some(date) == cursor.pred_opt());
            if !matches {
                break;
            }
            streak += 1;
            match date.pred_opt() {
                Some(prev) => cursor = prev,
                None => break,
            }
        }
        streak
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keys::ItemKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date")
    }

    #[test]
    fn toggle_starts_from_false_and_flips() {
        let mut record = ProgressRecord::empty();
        assert!(!record.is_completed(ProgressKind::Lesson, "python-01"));

        assert!(record.toggle(ProgressKind::Lesson, "python-01"));
        assert!(record.is_completed(ProgressKind::Lesson, "python-01"));

        assert!(!record.toggle(ProgressKind::Lesson, "python-01"));
        assert!(!record.is_completed(ProgressKind::Lesson, "python-01"));
    }

    #[test]
    fn namespaces_are_independent() {
        let mut record = ProgressRecord::empty();
        record.toggle(ProgressKind::Lesson, "shared-id");
        assert!(!record.is_completed(ProgressKind::Project, "shared-id"));
        assert!(!record.is_completed(ProgressKind::Task, "shared-id"));
    }

    #[test]
    fn favorite_round_trip_restores_set() {
        let mut record = ProgressRecord::empty();
        record.toggle_favorite(&ItemKey::project("project-01"));
        let before = record.favorites.clone();

        let key = ItemKey::lesson("python-03");
        assert!(record.toggle_favorite(&key));
        assert!(record.is_favorite(&key));
        assert!(!record.toggle_favorite(&key));

        assert_eq!(record.favorites, before);
    }

    #[test]
    fn whitespace_note_is_removed() {
        let mut record = ProgressRecord::empty();
        let key = ItemKey::lesson("python-05");

        record.set_note(&key, "  ループはrangeで書く  ");
        assert_eq!(record.note(&key), Some("ループはrangeで書く"));

        record.set_note(&key, "   \n\t ");
        assert_eq!(record.note(&key), None);
        assert!(!record.notes.contains_key("lesson:python-05"));
    }

    #[test]
    fn note_keys_carry_kind_prefix() {
        let mut record = ProgressRecord::empty();
        record.set_note(&ItemKey::new(ItemKind::Project, "project-02"), "memo");
        assert!(record.notes.contains_key("project:project-02"));
    }

    #[test]
    fn record_study_deduplicates() {
        let mut record = ProgressRecord::empty();
        record.record_study(day(10));
        record.record_study(day(10));
        assert_eq!(record.study_dates.len(), 1);
    }

    #[test]
    fn streak_counts_contiguous_days() {
        let mut record = ProgressRecord::empty();
        for d in [8, 9, 10] {
            record.record_study(day(d));
        }
        assert_eq!(record.streak(day(10)), 3);
    }

    #[test]
    fn streak_breaks_on_single_gap() {
        let mut record = ProgressRecord::empty();
        record.record_study(day(10));
        record.record_study(day(8));
        assert_eq!(record.streak(day(10)), 1);
    }

    #[test]
    fn streak_is_zero_without_dates() {
        assert_eq!(ProgressRecord::empty().streak(day(10)), 0);
    }

    #[test]
    fn yesterday_still_counts() {
        let mut record = ProgressRecord::empty();
        record.record_study(day(9));
        assert_eq!(record.streak(day(10)), 1);
    }

    #[test]
    fn yesterday_grace_applies_only_once() {
        // 9 and 7 with today=10: the scan may start at yesterday, but the
        // second date is a real gap.
        let mut record = ProgressRecord::empty();
        record.record_study(day(9));
        record.record_study(day(7));
        assert_eq!(record.streak(day(10)), 1);
    }

    #[test]
    fn streak_ignores_dates_older_than_the_break() {
        let mut record = ProgressRecord::empty();
        for d in [10, 9, 7, 6, 5] {
            record.record_study(day(d));
        }
        assert_eq!(record.streak(day(10)), 2);
    }

    #[test]
    fn day_two_days_back_does_not_count() {
        let mut record = ProgressRecord::empty();
        record.record_study(day(8));
        assert_eq!(record.streak(day(10)), 0);
    }

    #[test]
    fn serde_shape_matches_persisted_contract() {
        let mut record = ProgressRecord::empty();
        record.toggle(ProgressKind::Lesson, "python-01");
        record.toggle_favorite(&ItemKey::lesson("python-01"));
        record.set_note(&ItemKey::lesson("python-01"), "note");
        record.record_study(day(10));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["lessons"]["python-01"], true);
        assert!(
            json["favorites"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("lesson:python-01"))
        );
        assert_eq!(json["notes"]["lesson:python-01"], "note");
        assert_eq!(json["study_dates"][0], "2024-03-10");
    }

    #[test]
    fn missing_containers_default_to_empty() {
        // Older records only carried lessons/projects.
        let record: ProgressRecord =
            serde_json::from_str(r#"{"lessons": {"python-01": true}, "projects": {}}"#).unwrap();
        assert!(record.is_completed(ProgressKind::Lesson, "python-01"));
        assert!(record.tasks.is_empty());
        assert!(record.favorites.is_empty());
        assert!(record.notes.is_empty());
        assert!(record.study_dates.is_empty());
    }

    #[test]
    fn foreign_favorite_prefixes_survive_round_trips() {
        let mut record = ProgressRecord::empty();
        record.favorites.insert("bookmark:python-01".to_string());
        let json = serde_json::to_string(&record).unwrap();
        let reloaded: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert!(reloaded.favorites.contains("bookmark:python-01"));
        assert_eq!(ItemKey::parse("bookmark:python-01"), None);
    }
}
