mod example;
mod guide;
pub mod keys;
mod lesson;
mod mistake;
mod principal;
mod progress;
mod project;
mod roadmap;

pub use example::CodeExample;
pub use guide::{Phase3Guide, PracticalTask, TimelineStep};
pub use keys::{ItemKey, ItemKind, ParseKindError, ProgressKind};
pub use lesson::{Category, Lesson, Level};
pub use mistake::CommonMistake;
pub use principal::Principal;
pub use progress::ProgressRecord;
pub use project::Project;
pub use roadmap::RoadmapPhase;
