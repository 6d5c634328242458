use serde::Serialize;

/// One step of the phase-3 learning timeline shown on the lessons page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub step: u8,
    pub title: &'static str,
    pub lessons: &'static [&'static str],
    pub description: &'static str,
}

/// A practical checklist task for phase 3, completable via the `tasks`
/// progress namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticalTask {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Static guide material for the phase-3 section of the lessons page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase3Guide {
    pub overview: &'static [&'static str],
    pub timeline: &'static [TimelineStep],
    pub tasks: &'static [PracticalTask],
}
