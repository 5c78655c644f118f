//! Core logic for YoAnoto.
//!
//! This crate contains pure domain logic with ZERO UI dependencies. The only
//! I/O is the local name-suggestion cache.
//!
//! # Modules
//!
//! - `split` - Balances, debt simplification, summaries and share text
//! - `truco` - Truco match scoreboard
//! - `names` - Participant name suggestions remembered across sessions

pub mod names;
pub mod split;
pub mod truco;
