//! Match configuration and scoreboard value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yoanoto_shared::types::ScoreEventId;

use super::error::TrucoError;

/// Points that split a 30-point match into malas and buenas.
pub const HALF_POINTS: u32 = 15;

/// Supported match lengths.
pub const TARGET_OPTIONS: [u32; 2] = [15, 30];

/// Matchsticks per drawn group.
pub const TALLY_GROUP: u32 = 5;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// First team, "Nosotros" by default.
    One,
    /// Second team, "Ellos" by default.
    Two,
}

impl Team {
    /// Position of the team in per-team arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Returns the opposing team.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

/// How many faltas a match is played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaltaEnvido {
    /// A won falta closes the whole match.
    OneFalta,
    /// A won falta closes the current half.
    #[default]
    TwoFaltas,
}

/// Match settings chosen before the first hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchConfig {
    team_names: [String; 2],
    target: u32,
    with_flor: bool,
    falta_envido: FaltaEnvido,
}

impl MatchConfig {
    /// Creates a validated configuration. Team names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `TrucoError::InvalidTarget` unless `target` is 15 or 30 and
    /// `TrucoError::EmptyTeamName` for a blank name.
    pub fn new(
        team_names: [&str; 2],
        target: u32,
        with_flor: bool,
        falta_envido: FaltaEnvido,
    ) -> Result<Self, TrucoError> {
        if !TARGET_OPTIONS.contains(&target) {
            return Err(TrucoError::InvalidTarget(target));
        }
        if team_names.iter().any(|name| name.trim().is_empty()) {
            return Err(TrucoError::EmptyTeamName);
        }

        Ok(Self {
            team_names: team_names.map(|name| name.trim().to_string()),
            target,
            with_flor,
            falta_envido,
        })
    }

    /// Returns the display name of `team`.
    #[must_use]
    pub fn team_name(&self, team: Team) -> &str {
        &self.team_names[team.index()]
    }

    /// Points needed to win.
    #[must_use]
    pub const fn target(&self) -> u32 {
        self.target
    }

    /// Whether flor is played.
    #[must_use]
    pub const fn with_flor(&self) -> bool {
        self.with_flor
    }

    /// Falta envido mode.
    #[must_use]
    pub const fn falta_envido(&self) -> FaltaEnvido {
        self.falta_envido
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            team_names: ["Nosotros".to_string(), "Ellos".to_string()],
            target: 30,
            with_flor: false,
            falta_envido: FaltaEnvido::TwoFaltas,
        }
    }
}

/// A recorded point award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Event identifier.
    pub id: ScoreEventId,
    /// Team that scored.
    pub team: Team,
    /// Points asked for.
    pub requested: u32,
    /// Points actually added after clamping at the target.
    pub applied: u32,
    /// When the points were added.
    pub at: DateTime<Utc>,
}

/// Which half of a 30-point match a score sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    /// First 15 points.
    Malas,
    /// Last 15 points.
    Buenas,
}

/// Matchstick drawing of a score within its half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Half being drawn.
    pub half: Half,
    /// Points within the half.
    pub points: u32,
    /// Complete groups of five.
    pub full_groups: u32,
    /// Sticks in the trailing incomplete group.
    pub remainder: u32,
}

impl Tally {
    /// Draws a raw score.
    #[must_use]
    pub const fn of_score(score: u32) -> Self {
        let (half, points) = if score >= HALF_POINTS {
            (Half::Buenas, score - HALF_POINTS)
        } else {
            (Half::Malas, score)
        };
        Self {
            half,
            points,
            full_groups: points / TALLY_GROUP,
            remainder: points % TALLY_GROUP,
        }
    }
}
