//! Truco scoreboard error types.

use thiserror::Error;
use yoanoto_shared::AppError;

use super::types::Team;

/// Errors that can occur while configuring or scoring a match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrucoError {
    /// Matches are played to 15 or 30 points.
    #[error("Unsupported target score {0}, expected 15 or 30")]
    InvalidTarget(u32),

    /// Team name is blank.
    #[error("Team name cannot be empty")]
    EmptyTeamName,

    /// Points cannot be added once a team has won.
    #[error("Match already won by {winner:?}")]
    MatchFinished {
        /// Team that reached the target.
        winner: Team,
    },
}

impl TrucoError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget(_) => "INVALID_TARGET",
            Self::EmptyTeamName => "EMPTY_TEAM_NAME",
            Self::MatchFinished { .. } => "MATCH_FINISHED",
        }
    }
}

impl From<TrucoError> for AppError {
    fn from(err: TrucoError) -> Self {
        match err {
            TrucoError::MatchFinished { .. } => Self::BusinessRule(err.to_string()),
            TrucoError::InvalidTarget(_) | TrucoError::EmptyTeamName => {
                Self::Validation(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_mapping() {
        assert_eq!(TrucoError::InvalidTarget(20).error_code(), "INVALID_TARGET");
        assert_eq!(
            TrucoError::InvalidTarget(20).to_string(),
            "Unsupported target score 20, expected 15 or 30"
        );
        assert!(matches!(
            AppError::from(TrucoError::MatchFinished { winner: Team::One }),
            AppError::BusinessRule(_)
        ));
        assert!(matches!(
            AppError::from(TrucoError::EmptyTeamName),
            AppError::Validation(_)
        ));
    }
}
