//! Request extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use manabi_core::model::Principal;

use crate::session::principal_from_headers;
use crate::state::AppState;

/// The session principal, if the request carries a valid session cookie.
///
/// Extraction never rejects; anonymous requests yield `AuthSession(None)` and
/// each handler decides whether to redirect, 401, or render a public page.
pub struct AuthSession(pub Option<Principal>);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(principal_from_headers(&parts.headers, &state.sessions)))
    }
}
