mod board;
pub use board::{Board, CheckerCounts};

mod checker;
pub use checker::Checker;

mod color;
pub use color::Color;

mod player;
pub use player::Player;

mod position;
pub use position::{BAR, OFF, Position, SLOTS};

mod error;
pub use error::{Error, RuleError};

mod layout;
pub use layout::{CHECKERS_PER_COLOR, Layout, PlayAnalysis};

mod outcome;
pub use outcome::{GameOutcome, GameResult};

mod game;
pub use game::{Game, TurnPhase, TurnState};

mod halfmove;
pub use halfmove::HalfMove;

mod full_move;
pub use full_move::Move;

mod dice;
pub use dice::{Dice, DiceRoll, DiceSource, DiceUsage, FixedDice, RollDice};
