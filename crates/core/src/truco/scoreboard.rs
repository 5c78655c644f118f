//! Running score of a Truco match.
//!
//! Each award is recorded with the points actually applied after clamping,
//! so undoing it restores the previous score exactly.

use chrono::Utc;
use tracing::{debug, info};
use yoanoto_shared::types::ScoreEventId;

use super::error::TrucoError;
use super::types::{FaltaEnvido, HALF_POINTS, MatchConfig, ScoreEvent, Tally, Team};

/// Scores, history and winner of one match.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    config: MatchConfig,
    scores: [u32; 2],
    history: Vec<ScoreEvent>,
    winner: Option<Team>,
}

impl Scoreboard {
    /// Starts a match at 0-0.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            scores: [0, 0],
            history: Vec::new(),
            winner: None,
        }
    }

    /// Returns the match configuration.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the score of `team`.
    #[must_use]
    pub const fn score(&self, team: Team) -> u32 {
        self.scores[team.index()]
    }

    /// Returns the awards in the order they were made.
    #[must_use]
    pub fn history(&self) -> &[ScoreEvent] {
        &self.history
    }

    /// Returns the team that reached the target, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Adds points to `team`, clamping at the target.
    ///
    /// Returns the recorded event, or `None` when nothing was applied.
    ///
    /// # Errors
    ///
    /// Returns `TrucoError::MatchFinished` once a team has won.
    pub fn add_points(
        &mut self,
        team: Team,
        points: u32,
    ) -> Result<Option<&ScoreEvent>, TrucoError> {
        if let Some(winner) = self.winner {
            return Err(TrucoError::MatchFinished { winner });
        }

        let target = self.config.target();
        let current = self.scores[team.index()];
        let updated = current.saturating_add(points).min(target);
        let applied = updated - current;
        if applied == 0 {
            return Ok(None);
        }

        self.scores[team.index()] = updated;
        self.history.push(ScoreEvent {
            id: ScoreEventId::new(),
            team,
            requested: points,
            applied,
            at: Utc::now(),
        });
        debug!(?team, requested = points, applied, score = updated, "points added");

        if updated >= target {
            self.winner = Some(team);
            info!(team = self.config.team_name(team), score = updated, "match won");
        }
        Ok(self.history.last())
    }

    /// Points a won falta envido is worth to `team`.
    ///
    /// With one falta it closes the match. With two faltas it closes the
    /// current half: up to 15 from malas, up to the target from buenas.
    #[must_use]
    pub fn falta_envido_points(&self, team: Team) -> u32 {
        let score = self.score(team);
        let target = self.config.target();
        match self.config.falta_envido() {
            FaltaEnvido::OneFalta => target.saturating_sub(score),
            FaltaEnvido::TwoFaltas if self.is_buenas(team) => target.saturating_sub(score),
            FaltaEnvido::TwoFaltas => HALF_POINTS - score,
        }
    }

    /// Returns true once `team` has reached the buenas.
    #[must_use]
    pub const fn is_buenas(&self, team: Team) -> bool {
        self.score(team) >= HALF_POINTS
    }

    /// Matchstick drawing of `team`'s score within its half.
    #[must_use]
    pub const fn tally(&self, team: Team) -> Tally {
        Tally::of_score(self.score(team))
    }

    /// Reverts the last award and clears the winner.
    pub fn undo(&mut self) -> Option<ScoreEvent> {
        let event = self.history.pop()?;
        let score = &mut self.scores[event.team.index()];
        *score = score.saturating_sub(event.applied);
        self.winner = None;
        debug!(team = ?event.team, reverted = event.applied, "award undone");
        Some(event)
    }

    /// Resets scores and history, keeping the configuration.
    pub fn rematch(&mut self) {
        self.scores = [0, 0];
        self.history.clear();
        self.winner = None;
        info!("rematch started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn board(target: u32, falta_envido: FaltaEnvido) -> Scoreboard {
        let config = MatchConfig::new(["Nosotros", "Ellos"], target, false, falta_envido);
        Scoreboard::new(config.unwrap())
    }

    #[test]
    fn test_add_points_records_history() {
        let mut board = Scoreboard::default();
        let event = board.add_points(Team::One, 2).unwrap().unwrap();
        assert_eq!((event.team, event.requested, event.applied), (Team::One, 2, 2));

        board.add_points(Team::Two, 4).unwrap();
        assert_eq!(board.score(Team::One), 2);
        assert_eq!(board.score(Team::Two), 4);
        assert_eq!(board.history().len(), 2);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_score_clamps_at_target_and_wins() {
        let mut board = board(15, FaltaEnvido::TwoFaltas);
        board.add_points(Team::Two, 13).unwrap();
        let event = board.add_points(Team::Two, 4).unwrap().unwrap();

        assert_eq!((event.requested, event.applied), (4, 2));
        assert_eq!(board.score(Team::Two), 15);
        assert_eq!(board.winner(), Some(Team::Two));
        assert_eq!(
            board.add_points(Team::One, 1),
            Err(TrucoError::MatchFinished { winner: Team::Two })
        );
    }

    #[test]
    fn test_zero_points_are_not_recorded() {
        let mut board = Scoreboard::default();
        assert_eq!(board.add_points(Team::One, 0), Ok(None));
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_undo_restores_clamped_award() {
        let mut board = board(30, FaltaEnvido::TwoFaltas);
        board.add_points(Team::One, 28).unwrap();
        board.add_points(Team::One, 4).unwrap();
        assert_eq!(board.winner(), Some(Team::One));

        let undone = board.undo().unwrap();
        assert_eq!(undone.applied, 2);
        assert_eq!(board.score(Team::One), 28);
        assert_eq!(board.winner(), None);
        assert!(board.add_points(Team::Two, 1).is_ok());
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut board = Scoreboard::default();
        assert_eq!(board.undo(), None);
    }

    #[test]
    fn test_rematch_keeps_config() {
        let mut board = board(15, FaltaEnvido::OneFalta);
        board.add_points(Team::One, 15).unwrap();
        board.rematch();

        assert_eq!(board.score(Team::One), 0);
        assert!(board.history().is_empty());
        assert_eq!(board.winner(), None);
        assert_eq!(board.config().target(), 15);
    }

    #[rstest]
    #[case::one_falta_from_malas(FaltaEnvido::OneFalta, 30, 7, 23)]
    #[case::one_falta_from_buenas(FaltaEnvido::OneFalta, 30, 20, 10)]
    #[case::two_faltas_from_malas(FaltaEnvido::TwoFaltas, 30, 7, 8)]
    #[case::two_faltas_from_buenas(FaltaEnvido::TwoFaltas, 30, 20, 10)]
    #[case::two_faltas_at_half(FaltaEnvido::TwoFaltas, 30, 15, 15)]
    #[case::short_match(FaltaEnvido::TwoFaltas, 15, 4, 11)]
    fn test_falta_envido_points(
        #[case] mode: FaltaEnvido,
        #[case] target: u32,
        #[case] score: u32,
        #[case] expected: u32,
    ) {
        let mut board = board(target, mode);
        board.add_points(Team::One, score).unwrap();
        assert_eq!(board.falta_envido_points(Team::One), expected);
    }

    #[test]
    fn test_buenas_and_tally() {
        let mut board = Scoreboard::default();
        board.add_points(Team::One, 18).unwrap();

        assert!(board.is_buenas(Team::One));
        assert!(!board.is_buenas(Team::Two));
        assert_eq!(board.tally(Team::One).points, 3);
        assert_eq!(board.tally(Team::Two).points, 0);
    }
}
