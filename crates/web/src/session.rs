//! Cookie sessions backed by signed, expiring JWTs.
//!
//! The session reference the identity gate hands out is an HS256 token in an
//! HttpOnly cookie; nothing is persisted server-side. A tampered or expired
//! token simply reads as "not signed in".

use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use manabi_core::model::Principal;

pub const SESSION_COOKIE: &str = "manabi_session";

/// Fallback signing secret for development; see [`SessionSigner::new`].
pub const DEV_SECRET: &str = "dev-secret-key";

const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Principal id (lowercased email).
    sub: String,
    /// Display name.
    name: String,
    exp: i64,
}

/// Issues and verifies session tokens.
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionSigner {
    /// Builds a signer from the configured secret.
    ///
    /// Deployments set `MANABI_SECRET`; absent that, [`DEV_SECRET`] keeps
    /// local development working and is unacceptable anywhere else.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a session token for a principal.
    #[must_use]
    pub fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> String {
        let claims = Claims {
            sub: principal.id.clone(),
            name: principal.name.clone(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .expect("HS256 signing cannot fail with a valid key")
    }

    /// Recovers the principal from a token, if valid and unexpired.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Principal> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation).ok()?;
        Some(Principal::new(data.claims.sub, data.claims.name))
    }

    /// `Set-Cookie` value establishing a session.
    #[must_use]
    pub fn login_cookie(&self, principal: &Principal, now: DateTime<Utc>) -> String {
        let token = self.issue(principal, now);
        let max_age = Duration::days(SESSION_TTL_DAYS).num_seconds();
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
    }

    /// `Set-Cookie` value clearing the session.
    #[must_use]
    pub fn logout_cookie() -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Reads the session principal out of request headers, if any.
#[must_use]
pub fn principal_from_headers(headers: &HeaderMap, signer: &SessionSigner) -> Option<Principal> {
    let token = cookie_value(headers, SESSION_COOKIE)?;
    signer.verify(token)
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use manabi_core::time::fixed_now;

    fn principal() -> Principal {
        Principal::new("user@example.com", "受講生")
    }

    #[test]
    fn token_round_trips() {
        let signer = SessionSigner::new("test-secret");
        let token = signer.issue(&principal(), Utc::now());
        assert_eq!(signer.verify(&token), Some(principal()));
    }

    #[test]
    fn tampered_token_reads_as_anonymous() {
        let signer = SessionSigner::new("test-secret");
        let other = SessionSigner::new("other-secret");
        let token = signer.issue(&principal(), Utc::now());
        assert_eq!(other.verify(&token), None);
        assert_eq!(signer.verify("garbage"), None);
    }

    #[test]
    fn expired_token_reads_as_anonymous() {
        let signer = SessionSigner::new("test-secret");
        // Issued far in the past relative to real validation time.
        let token = signer.issue(&principal(), fixed_now() - Duration::days(365));
        assert_eq!(signer.verify(&token), None);
    }

    #[test]
    fn cookie_parsing_handles_multiple_pairs() {
        let signer = SessionSigner::new("test-secret");
        let token = signer.issue(&principal(), Utc::now());

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("theme=dark; {SESSION_COOKIE}={token}; lang=ja")
                .parse()
                .unwrap(),
        );
        assert_eq!(principal_from_headers(&headers, &signer), Some(principal()));
    }

    #[test]
    fn missing_cookie_is_anonymous() {
        let signer = SessionSigner::new("test-secret");
        assert_eq!(principal_from_headers(&HeaderMap::new(), &signer), None);
    }

    #[test]
    fn logout_cookie_expires_immediately() {
        assert!(SessionSigner::logout_cookie().contains("Max-Age=0"));
    }
}
