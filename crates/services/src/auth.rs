//! The identity gate: credential verification producing a [`Principal`].
//!
//! The lookup capability is a trait so handlers and tests never reach for a
//! global credential table. Callers must treat a `None` from `verify` as a
//! single undifferentiated rejection; nothing distinguishes an unknown
//! identifier from a wrong secret.

use manabi_core::model::Principal;

/// Case/whitespace-normalizes a login identifier before lookup.
#[must_use]
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Injected identity-lookup capability.
pub trait CredentialStore: Send + Sync {
    /// Verifies a credential pair, returning the principal on a match.
    ///
    /// Unknown identifier and wrong secret are indistinguishable by design.
    fn verify(&self, identifier: &str, secret: &str) -> Option<Principal>;
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    name: String,
}

/// Fixed in-process credential table.
#[derive(Debug, Clone, Default)]
pub struct FixedCredentials {
    accounts: Vec<Account>,
}

impl FixedCredentials {
    /// The single built-in development account.
    #[must_use]
    pub fn builtin() -> Self {
        Self::default().with_account("user@example.com", "testpass", "受講生")
    }

    /// Adds an account; the email is stored normalized.
    #[must_use]
    pub fn with_account(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.accounts.push(Account {
            email: normalize_identifier(&email.into()),
            password: password.into(),
            name: name.into(),
        });
        self
    }
}

impl CredentialStore for FixedCredentials {
    fn verify(&self, identifier: &str, secret: &str) -> Option<Principal> {
        let identifier = normalize_identifier(identifier);
        self.accounts
            .iter()
            .find(|account| account.email == identifier && account.password == secret)
            .map(|account| Principal::new(account.email.clone(), account.name.clone()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
