#![forbid(unsafe_code)]

//! HTTP presentation layer: route handlers joining the content catalog with
//! per-user progress, plus the JSON API for toggling that state.

pub mod api;
pub mod content;
pub mod extract;
pub mod pages;
pub mod render;
pub mod session;
pub mod state;
pub mod vm;

use axum::Router;
use axum::routing::{get, post};

pub use session::SessionSigner;
pub use state::AppState;

/// Builds the full application router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/roadmap", get(pages::roadmap))
        .route("/lessons", get(pages::lessons_list))
        .route("/lessons/{lesson_id}", get(pages::lesson_detail))
        .route("/projects", get(pages::projects_list))
        .route("/projects/{project_id}", get(pages::project_detail))
        .route("/phase2", get(pages::phase2))
        .route("/portfolio", get(pages::portfolio))
        .route("/faq", get(pages::faq))
        .route("/common-mistakes", get(pages::common_mistakes))
        .route("/code-examples", get(pages::code_examples))
        .route("/search", get(pages::search))
        .route("/dashboard", get(pages::dashboard))
        .route("/favorites", get(pages::favorites))
        .route("/login", get(pages::login_form).post(pages::login_submit))
        .route("/logout", get(pages::logout))
        .route("/api/progress/toggle", post(api::progress_toggle))
        .route("/api/favorites/toggle", post(api::favorites_toggle))
        .route("/api/notes/save", post(api::notes_save))
        .fallback(pages::not_found)
        .with_state(state)
}
