//! Truco match scoreboard.
//!
//! Two teams, a 15 or 30 point target, clamped awards with exact undo, and
//! the falta envido value for the current half.

pub mod error;
pub mod scoreboard;
pub mod types;


pub use error::TrucoError;
pub use scoreboard::Scoreboard;
pub use types::{
    FaltaEnvido, HALF_POINTS, Half, MatchConfig, ScoreEvent, TARGET_OPTIONS, Tally, Team,
};
