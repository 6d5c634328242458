use serde::Serialize;

/// A common beginner mistake with a wrong/correct example pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonMistake {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub wrong_code: &'static str,
    pub correct_code: &'static str,
    pub explanation: &'static str,
    pub related_lessons: &'static [&'static str],
}
