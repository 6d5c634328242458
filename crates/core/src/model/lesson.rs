use serde::Serialize;
use std::fmt;

/// Curriculum category a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Basic,
    WebFoundation,
    WebApp,
}

impl Category {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::WebFoundation => "web-foundation",
            Category::WebApp => "web-app",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level, displayed in Japanese as the curriculum does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    Beginner,
    Intermediate,
}

impl Level {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "初級",
            Level::Intermediate => "中級",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single curriculum lesson.
///
/// Lessons are defined once at startup and never mutated; their ordering in
/// the catalog is their declaration order, which drives prev/next navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub level: Level,
    pub phase: u8,
}
