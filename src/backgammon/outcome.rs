use serde::{Deserialize, Serialize};

use crate::backgammon::{Color, Layout};

/// How a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    #[display("single")]
    Single,
    #[display("gammon")]
    Gammon,
    #[display("backgammon")]
    Backgammon,
}

impl GameOutcome {
    pub fn points(&self) -> u32 {
        match self {
            GameOutcome::Single => 1,
            GameOutcome::Gammon => 2,
            GameOutcome::Backgammon => 3,
        }
    }

    /// Scores a finished game for `winner`.
    ///
    /// Checked in order: the loser bore off anything (single), the loser has
    /// nothing on the bar or in the winner's home (gammon), otherwise backgammon.
    pub fn determine(layout: &Layout, winner: Color) -> GameOutcome {
        let loser = winner.opposite();
        if layout.off(loser) > 0 {
            return GameOutcome::Single;
        }
        let (start, end) = winner.home_range();
        let in_winner_home = (start..=end).any(|point| layout.count(loser, point) > 0);
        if layout.bar(loser) == 0 && !in_winner_home {
            GameOutcome::Gammon
        } else {
            GameOutcome::Backgammon
        }
    }
}

/// Final result attached to a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Color,
    pub outcome: GameOutcome,
    pub points: u32,
}

impl GameResult {
    pub fn new(winner: Color, outcome: GameOutcome) -> Self {
        GameResult { winner, outcome, points: outcome.points() }
    }

    pub fn loser(&self) -> Color {
        self.winner.opposite()
    }
}
