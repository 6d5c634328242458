#![forbid(unsafe_code)]

pub mod json_store;
pub mod repository;

pub use json_store::JsonProgressStore;
pub use repository::{
    FreshReason, InMemoryProgressStore, LoadedProgress, ProgressRepository, StorageError,
};
