//! Participant name suggestions remembered across sessions.

pub mod cache;
pub mod error;
pub mod store;

pub use cache::{DEFAULT_SUGGESTIONS, NameCache};
pub use error::NameCacheError;
pub use store::NameCacheStore;
