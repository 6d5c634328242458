//! The content catalog: every lesson, project, roadmap phase, common
//! mistake, and code example the platform serves.
//!
//! The catalog is built once at startup and never changes. All queries are
//! linear scans over declaration-ordered slices; the data set is a few dozen
//! records, so nothing fancier is warranted.

mod data;

use crate::model::{
    CodeExample, CommonMistake, Lesson, Phase3Guide, Project, RoadmapPhase,
};

/// Which collections a content search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    Lessons,
    Projects,
    #[default]
    All,
}

impl SearchScope {
    /// Parses the `scope` query parameter; anything unrecognized or empty
    /// searches both collections.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("lessons") => SearchScope::Lessons,
            Some("projects") => SearchScope::Projects,
            _ => SearchScope::All,
        }
    }
}

/// Result of a content search, split per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults<'a> {
    pub lessons: Vec<&'a Lesson>,
    pub projects: Vec<&'a Project>,
}

impl SearchResults<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty() && self.projects.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lessons.len() + self.projects.len()
    }
}

/// Immutable content catalog.
pub struct Catalog {
    lessons: Vec<Lesson>,
    projects: Vec<Project>,
    roadmap: Vec<RoadmapPhase>,
    mistakes: Vec<CommonMistake>,
    examples: Vec<CodeExample>,
    phase3: Phase3Guide,
}

impl Catalog {
    /// The built-in curriculum.
    #[must_use]
    pub fn builtin() -> Self {
        data::builtin()
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn roadmap(&self) -> &[RoadmapPhase] {
        &self.roadmap
    }

    #[must_use]
    pub fn mistakes(&self) -> &[CommonMistake] {
        &self.mistakes
    }

    #[must_use]
    pub fn examples(&self) -> &[CodeExample] {
        &self.examples
    }

    #[must_use]
    pub fn phase3(&self) -> &Phase3Guide {
        &self.phase3
    }

    #[must_use]
    pub fn lesson_by_id(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == id)
    }

    #[must_use]
    pub fn lessons_by_category(&self, category: &str) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|lesson| lesson.category.as_str() == category)
            .collect()
    }

    #[must_use]
    pub fn lessons_by_level(&self, level: &str) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|lesson| lesson.level.as_str() == level)
            .collect()
    }

    #[must_use]
    pub fn lessons_by_phase(&self, phase: u8) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|lesson| lesson.phase == phase)
            .collect()
    }

    #[must_use]
    pub fn project_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    #[must_use]
    pub fn phase_by_name(&self, name: &str) -> Option<&RoadmapPhase> {
        self.roadmap.iter().find(|phase| phase.name == name)
    }

    /// Mistakes in a category; `None` returns the full list.
    #[must_use]
    pub fn mistakes_by_category(&self, category: Option<&str>) -> Vec<&CommonMistake> {
        match category {
            Some(category) => self
                .mistakes
                .iter()
                .filter(|mistake| mistake.category == category)
                .collect(),
            None => self.mistakes.iter().collect(),
        }
    }

    #[must_use]
    pub fn examples_by_category(&self, category: &str) -> Vec<&CodeExample> {
        self.examples
            .iter()
            .filter(|example| example.category == category)
            .collect()
    }

    /// Case-insensitive substring search over example titles, descriptions,
    /// and keywords. An empty query returns the full list.
    #[must_use]
    pub fn search_code_examples(&self, query: &str) -> Vec<&CodeExample> {
        if query.is_empty() {
            return self.examples.iter().collect();
        }
        let needle = query.to_lowercase();
        self.examples
            .iter()
            .filter(|example| {
                example.title.to_lowercase().contains(&needle)
                    || example.description.to_lowercase().contains(&needle)
                    || example
                        .keywords
                        .iter()
                        .any(|keyword| keyword.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Case-insensitive substring search over lessons and projects.
    ///
    /// Unlike [`Catalog::search_code_examples`], an empty query returns
    /// empty results. The asymmetry is inherited behavior and kept as an
    /// explicit contract; do not unify the two without a product decision.
    #[must_use]
    pub fn search_content(&self, query: &str, scope: SearchScope) -> SearchResults<'_> {
        if query.is_empty() {
            return SearchResults::default();
        }
        let needle = query.to_lowercase();

        let mut results = SearchResults::default();
        if matches!(scope, SearchScope::Lessons | SearchScope::All) {
            results.lessons = self
                .lessons
                .iter()
                .filter(|lesson| {
                    lesson.title.to_lowercase().contains(&needle)
                        || lesson.category.as_str().contains(&needle)
                })
                .collect();
        }
        if matches!(scope, SearchScope::Projects | SearchScope::All) {
            results.projects = self
                .projects
                .iter()
                .filter(|project| {
                    project.title.to_lowercase().contains(&needle)
                        || project.description.to_lowercase().contains(&needle)
                })
                .collect();
        }
        results
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
