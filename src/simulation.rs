//! Headless self-play: random legal games run through the public engine API.

use std::fmt::Display;

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::backgammon::{Color, Dice, Error, Game, GameOutcome, GameResult, TurnPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub games: usize,
    /// Game `i` is played with seed `seed + i`.
    pub seed: u64,
    /// Games still running after this many turns are counted as unfinished.
    pub max_turns: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 1000,
            seed: 0,
            max_turns: 2000,
        }
    }
}

/// How a single simulated game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub result: Option<GameResult>,
    pub turns: u32,
}

/// Aggregated results, indexed by [`Color::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    pub games: usize,
    pub unfinished: usize,
    pub singles: [u32; 2],
    pub gammons: [u32; 2],
    pub backgammons: [u32; 2],
    pub points: [u32; 2],
    pub turns: u64,
}

impl SimulationStats {
    pub fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        self.turns += record.turns as u64;
        let Some(result) = record.result else {
            self.unfinished += 1;
            return;
        };
        let winner = result.winner.index();
        match result.outcome {
            GameOutcome::Single => self.singles[winner] += 1,
            GameOutcome::Gammon => self.gammons[winner] += 1,
            GameOutcome::Backgammon => self.backgammons[winner] += 1,
        }
        self.points[winner] += result.points;
    }

    pub fn merge(mut self, other: SimulationStats) -> SimulationStats {
        self.games += other.games;
        self.unfinished += other.unfinished;
        self.turns += other.turns;
        for i in 0..2 {
            self.singles[i] += other.singles[i];
            self.gammons[i] += other.gammons[i];
            self.backgammons[i] += other.backgammons[i];
            self.points[i] += other.points[i];
        }
        self
    }

    pub fn wins(&self, color: Color) -> u32 {
        let i = color.index();
        self.singles[i] + self.gammons[i] + self.backgammons[i]
    }

    fn rate(&self, count: u32) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        count as f32 / self.games as f32 * 100.0
    }

    pub fn win_rate(&self, color: Color) -> f32 {
        self.rate(self.wins(color))
    }
}

impl Display for SimulationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (white, black) = (Color::White.index(), Color::Black.index());
        writeln!(f, "============================================")?;
        writeln!(
            f,
            "Games: {}, White Wins: {}, Black Wins: {}, Unfinished: {}",
            self.games,
            self.wins(Color::White),
            self.wins(Color::Black),
            self.unfinished
        )?;
        writeln!(
            f,
            "White Win Rate: {:.2}%, Black Win Rate: {:.2}%",
            self.win_rate(Color::White),
            self.win_rate(Color::Black)
        )?;
        writeln!(
            f,
            "White Gammon Rate: {:.2}%, White Backgammon Rate: {:.2}%",
            self.rate(self.gammons[white]),
            self.rate(self.backgammons[white])
        )?;
        writeln!(
            f,
            "Black Gammon Rate: {:.2}%, Black Backgammon Rate: {:.2}%",
            self.rate(self.gammons[black]),
            self.rate(self.backgammons[black])
        )?;
        writeln!(f, "Points: White {}, Black {}", self.points[white], self.points[black])?;
        write!(f, "============================================")
    }
}

/// Plays one game where both sides pick uniformly among their legal moves.
pub fn play_random_game(seed: u64, max_turns: u32) -> Result<GameRecord, Error> {
    let mut game = Game::standard(Dice::seeded(seed));
    let mut chooser = StdRng::seed_from_u64(seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15);

    while game.turn_number() <= max_turns {
        game.start_turn()?;
        while game.phase() == TurnPhase::AwaitingMove {
            let moves = game.legal_moves();
            let Some(choice) = moves.choose(&mut chooser) else {
                break;
            };
            game.apply_player_move(choice.from().index(), choice.die())?;
        }
        if game.is_game_over() {
            break;
        }
        game.end_turn()?;
    }

    debug!(seed, turns = game.turn_number(), result = ?game.result(), "simulated game");
    Ok(GameRecord {
        result: game.result(),
        turns: game.turn_number(),
    })
}

/// Plays `config.games` random games in parallel.
#[instrument]
pub fn simulate_games(config: SimulationConfig) -> Result<SimulationStats, Error> {
    let stats = (0..config.games)
        .into_par_iter()
        .map(|i| play_random_game(config.seed.wrapping_add(i as u64), config.max_turns))
        .try_fold(SimulationStats::default, |mut stats, record| {
            stats.record(&record?);
            Ok::<_, Error>(stats)
        })
        .try_reduce(SimulationStats::default, |a, b| Ok(a.merge(b)))?;
    info!(games = stats.games, unfinished = stats.unfinished, "simulation finished");
    Ok(stats)
}
