#![forbid(unsafe_code)]

pub mod auth;
pub mod error;
pub mod progress_service;

pub use manabi_core::Clock;

pub use auth::{normalize_identifier, CredentialStore, FixedCredentials};
pub use error::ProgressServiceError;
pub use progress_service::ProgressService;
