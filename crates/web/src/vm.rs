//! View models: plain structs joining catalog entities with per-user
//! progress, assembled by pure functions so page handlers stay thin.

use manabi_core::model::{
    ItemKey, Lesson, PracticalTask, ProgressKind, ProgressRecord, Project,
};
use manabi_core::Catalog;

/// Recent completions shown on the dashboard are capped at this many.
const RECENT_LIMIT: usize = 5;

/// Integer progress percentage, rounded to nearest; `0` for an empty
/// category rather than a division error.
#[must_use]
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (100.0 * completed as f64 / total as f64).round() as u8
    }
}

/// Completed/total pair with its derived percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl PhaseProgress {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percent: percent(completed, total),
        }
    }
}

/// A lesson row with the signed-in user's flags.
#[derive(Debug, Clone)]
pub struct LessonItem<'a> {
    pub lesson: &'a Lesson,
    pub completed: bool,
    pub is_favorite: bool,
}

/// A phase-3 practical task row.
#[derive(Debug, Clone)]
pub struct TaskItem<'a> {
    pub task: &'a PracticalTask,
    pub completed: bool,
}

/// Everything the lessons page shows.
pub struct LessonsView<'a> {
    pub phase1: Vec<LessonItem<'a>>,
    pub phase3: Vec<LessonItem<'a>>,
    /// Present only when a user is signed in.
    pub phase3_progress: Option<PhaseProgress>,
    pub tasks: Vec<TaskItem<'a>>,
}

fn lesson_item<'a>(lesson: &'a Lesson, record: Option<&ProgressRecord>) -> LessonItem<'a> {
    match record {
        Some(record) => LessonItem {
            lesson,
            completed: record.is_completed(ProgressKind::Lesson, lesson.id),
            is_favorite: record.is_favorite(&ItemKey::lesson(lesson.id)),
        },
        None => LessonItem {
            lesson,
            completed: false,
            is_favorite: false,
        },
    }
}

#[must_use]
pub fn lessons_view<'a>(catalog: &'a Catalog, record: Option<&ProgressRecord>) -> LessonsView<'a> {
    let phase1: Vec<_> = catalog
        .lessons_by_phase(1)
        .into_iter()
        .map(|lesson| lesson_item(lesson, record))
        .collect();
    let phase3: Vec<_> = catalog
        .lessons_by_phase(3)
        .into_iter()
        .map(|lesson| lesson_item(lesson, record))
        .collect();

    let phase3_progress = record.map(|_| {
        let completed = phase3.iter().filter(|item| item.completed).count();
        PhaseProgress::new(completed, phase3.len())
    });

    let tasks = catalog
        .phase3()
        .tasks
        .iter()
        .map(|task| TaskItem {
            task,
            completed: record
                .is_some_and(|record| record.is_completed(ProgressKind::Task, task.id)),
        })
        .collect();

    LessonsView {
        phase1,
        phase3,
        phase3_progress,
        tasks,
    }
}

/// Lesson detail with prev/next within the same phase, in declaration order.
pub struct LessonDetailView<'a> {
    pub lesson: &'a Lesson,
    pub prev: Option<&'a Lesson>,
    pub next: Option<&'a Lesson>,
    pub completed: bool,
    pub is_favorite: bool,
    pub note: Option<String>,
}

#[must_use]
pub fn lesson_detail_view<'a>(
    catalog: &'a Catalog,
    lesson_id: &str,
    record: Option<&ProgressRecord>,
) -> Option<LessonDetailView<'a>> {
    let lesson = catalog.lesson_by_id(lesson_id)?;
    let siblings = catalog.lessons_by_phase(lesson.phase);
    let index = siblings.iter().position(|l| l.id == lesson.id)?;

    let key = ItemKey::lesson(lesson.id);
    Some(LessonDetailView {
        lesson,
        prev: (index > 0).then(|| siblings[index - 1]),
        next: siblings.get(index + 1).copied(),
        completed: record
            .is_some_and(|record| record.is_completed(ProgressKind::Lesson, lesson.id)),
        is_favorite: record.is_some_and(|record| record.is_favorite(&key)),
        note: record.and_then(|record| record.note(&key)).map(str::to_owned),
    })
}

/// Project detail with prev/next in declaration order.
pub struct ProjectDetailView<'a> {
    pub project: &'a Project,
    pub prev: Option<&'a Project>,
    pub next: Option<&'a Project>,
    pub completed: bool,
    pub is_favorite: bool,
    pub note: Option<String>,
}

#[must_use]
pub fn project_detail_view<'a>(
    catalog: &'a Catalog,
    project_id: &str,
    record: Option<&ProgressRecord>,
) -> Option<ProjectDetailView<'a>> {
    let projects = catalog.projects();
    let index = projects.iter().position(|p| p.id == project_id)?;
    let project = &projects[index];

    let key = ItemKey::project(project.id);
    Some(ProjectDetailView {
        project,
        prev: index.checked_sub(1).map(|i| &projects[i]),
        next: projects.get(index + 1),
        completed: record
            .is_some_and(|record| record.is_completed(ProgressKind::Project, project.id)),
        is_favorite: record.is_some_and(|record| record.is_favorite(&key)),
        note: record.and_then(|record| record.note(&key)).map(str::to_owned),
    })
}

/// A recently completed item linked from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCompletion<'a> {
    pub title: &'a str,
    pub href: String,
}

/// Everything the dashboard shows.
pub struct DashboardView<'a> {
    pub streak: u32,
    pub lessons: PhaseProgress,
    pub projects: PhaseProgress,
    pub tasks: PhaseProgress,
    pub recent: Vec<RecentCompletion<'a>>,
}

/// Assembles the dashboard from an already-refreshed record.
///
/// "Recent" completions are the completed lessons then projects in catalog
/// declaration order, capped at [`RECENT_LIMIT`]; completion timestamps are
/// not stored, so declaration order stands in for recency.
#[must_use]
pub fn dashboard_view<'a>(
    catalog: &'a Catalog,
    record: &ProgressRecord,
    streak: u32,
) -> DashboardView<'a> {
    let lessons_done = catalog
        .lessons()
        .iter()
        .filter(|lesson| record.is_completed(ProgressKind::Lesson, lesson.id))
        .count();
    let projects_done = catalog
        .projects()
        .iter()
        .filter(|project| record.is_completed(ProgressKind::Project, project.id))
        .count();
    let tasks_done = catalog
        .phase3()
        .tasks
        .iter()
        .filter(|task| record.is_completed(ProgressKind::Task, task.id))
        .count();

    let recent = catalog
        .lessons()
        .iter()
        .filter(|lesson| record.is_completed(ProgressKind::Lesson, lesson.id))
        .map(|lesson| RecentCompletion {
            title: lesson.title,
            href: format!("/lessons/{}", lesson.id),
        })
        .chain(
            catalog
                .projects()
                .iter()
                .filter(|project| record.is_completed(ProgressKind::Project, project.id))
                .map(|project| RecentCompletion {
                    title: project.title,
                    href: format!("/projects/{}", project.id),
                }),
        )
        .take(RECENT_LIMIT)
        .collect();

    DashboardView {
        streak,
        lessons: PhaseProgress::new(lessons_done, catalog.lessons().len()),
        projects: PhaseProgress::new(projects_done, catalog.projects().len()),
        tasks: PhaseProgress::new(tasks_done, catalog.phase3().tasks.len()),
        recent,
    }
}

/// Favorites resolved against the catalog.
pub struct FavoritesView<'a> {
    pub lessons: Vec<&'a Lesson>,
    pub projects: Vec<&'a Project>,
}

/// Resolves the favorites set in catalog declaration order. Entries with
/// unknown prefixes or ids that no longer exist are skipped, never dropped
/// from the stored set.
#[must_use]
pub fn favorites_view<'a>(catalog: &'a Catalog, record: &ProgressRecord) -> FavoritesView<'a> {
    FavoritesView {
        lessons: catalog
            .lessons()
            .iter()
            .filter(|lesson| record.is_favorite(&ItemKey::lesson(lesson.id)))
            .collect(),
        projects: catalog
            .projects()
            .iter()
            .filter(|project| record.is_favorite(&ItemKey::project(project.id)))
            .collect(),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
