use serde::{Deserialize, Serialize};

use crate::backgammon::Color;

/// A seat at the table: name, color and the running match score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    color: Color,
    score: u32,
    games_won: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Player {
            name: name.into(),
            color,
            score: 0,
            games_won: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn games_won(&self) -> u32 {
        self.games_won
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Records a won game worth `points`.
    pub fn win_game(&mut self, points: u32) {
        self.games_won += 1;
        self.add_score(points);
    }
}
