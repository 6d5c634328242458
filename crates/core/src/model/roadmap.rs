use serde::Serialize;

/// One phase of the learning roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapPhase {
    pub name: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub items: &'static [&'static str],
}
