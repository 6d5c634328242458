//! JSON API handlers.
//!
//! Each endpoint accepts a small JSON body and performs exactly one guarded
//! read-modify-write cycle. The body extraction never rejects on its own: a
//! malformed, absent, or unparsable body falls through to our own
//! `invalid_parameters` answer instead of a framework rejection, and
//! nothing is written to storage unless validation passes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use manabi_core::model::{ItemKey, ItemKind, ProgressKind};

use crate::extract::AuthSession;
use crate::pages::PageError;
use crate::state::AppState;

fn auth_required() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"ok": false, "error": "auth_required"})),
    )
        .into_response()
}

fn invalid_parameters() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"ok": false, "error": "invalid_parameters"})),
    )
        .into_response()
}

fn field<'a>(body: &'a Option<Json<Value>>, name: &str) -> Option<&'a str> {
    body.as_ref()?.get(name)?.as_str().filter(|s| !s.is_empty())
}

/// `POST /api/progress/toggle` with body `{item_id, kind: lesson|project|task}`.
pub async fn progress_toggle(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, PageError> {
    let Some(principal) = principal else {
        return Ok(auth_required());
    };
    let body = body.ok();
    let (Some(item_id), Some(kind)) = (field(&body, "item_id"), field(&body, "kind")) else {
        return Ok(invalid_parameters());
    };
    let Ok(kind) = kind.parse::<ProgressKind>() else {
        return Ok(invalid_parameters());
    };

    let completed = state.progress.toggle(&principal.id, kind, item_id).await?;
    Ok(Json(json!({"ok": true, "completed": completed})).into_response())
}

/// `POST /api/favorites/toggle` with body `{item_id, kind: lesson|project}`.
pub async fn favorites_toggle(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, PageError> {
    let Some(principal) = principal else {
        return Ok(auth_required());
    };
    let body = body.ok();
    let (Some(item_id), Some(kind)) = (field(&body, "item_id"), field(&body, "kind")) else {
        return Ok(invalid_parameters());
    };
    // Tasks cannot be favorited; ItemKind is deliberately narrower here.
    let Ok(kind) = kind.parse::<ItemKind>() else {
        return Ok(invalid_parameters());
    };

    let key = ItemKey::new(kind, item_id);
    let is_favorite = state.progress.toggle_favorite(&principal.id, &key).await?;
    Ok(Json(json!({"ok": true, "is_favorite": is_favorite})).into_response())
}

/// `POST /api/notes/save` with body `{item_id, kind: lesson|project, note}`.
///
/// A whitespace-only note removes any stored note for the key.
pub async fn notes_save(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, PageError> {
    let Some(principal) = principal else {
        return Ok(auth_required());
    };
    let body = body.ok();
    let (Some(item_id), Some(kind)) = (field(&body, "item_id"), field(&body, "kind")) else {
        return Ok(invalid_parameters());
    };
    let Ok(kind) = kind.parse::<ItemKind>() else {
        return Ok(invalid_parameters());
    };
    // The note itself may be empty (that means "clear"), but it must be a
    // string when present.
    let note = match body.as_ref().and_then(|Json(value)| value.get("note")) {
        None => "",
        Some(Value::String(note)) => note.as_str(),
        Some(_) => return Ok(invalid_parameters()),
    };

    let key = ItemKey::new(kind, item_id);
    state.progress.save_note(&principal.id, &key, note).await?;
    Ok(Json(json!({"ok": true})).into_response())
}
