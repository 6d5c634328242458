#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod time;

pub use catalog::{Catalog, SearchResults, SearchScope};
pub use model::keys::ParseKindError;
pub use time::Clock;
