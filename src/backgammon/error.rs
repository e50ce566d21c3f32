use crate::backgammon::Color;

/// Errors returned by the board and the turn engine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Error {
    /// A slot index outside `0..=25`.
    #[display("Invalid position {_0}: positions range from 0 (bar) to 25 (off)")]
    InvalidPosition(u8),

    /// A die value outside `1..=6`.
    #[display("Invalid die value {_0}: dice show 1 to 6")]
    InvalidDieValue(u8),

    /// A board snapshot that breaks the board invariants.
    #[display("Invalid layout: {_0}")]
    InvalidLayout(String),

    /// A move or turn action that breaks a rule of the game.
    #[display("{_0}")]
    Rule(RuleError),
}

impl std::error::Error for Error {}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        Error::Rule(err)
    }
}

impl Error {
    /// Returns the rule violation, if this is one.
    pub fn rule(&self) -> Option<&RuleError> {
        match self {
            Error::Rule(rule) => Some(rule),
            _ => None,
        }
    }
}

/// Rule violations. Each variant is a separate condition a front end can
/// branch on to guide the player.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RuleError {
    #[display("The game is already over")]
    GameOver,

    #[display("No turn is active, start the turn first")]
    TurnNotStarted,

    #[display("The turn has already started")]
    TurnAlreadyStarted,

    #[display("No legal moves remain this turn, end the turn")]
    TurnOver,

    #[display("Die {die} is not available (available: {available:?})")]
    DieNotAvailable { die: u8, available: Vec<u8> },

    #[display("{_0} must enter from the bar before moving other checkers")]
    MustEnterFromBar(Color),

    #[display("No {color} checker at position {position}")]
    NoCheckerAt { color: Color, position: u8 },

    #[display("Checkers that are off cannot move")]
    CannotMoveFromOff,

    #[display("Point {_0} is blocked")]
    PointBlocked(u8),

    #[display("Moving {steps} from {from} leaves the board, bear off instead")]
    MustBearOff { from: u8, steps: u8 },

    #[display("{_0} cannot bear off while checkers are on the bar or outside the home board")]
    CannotBearOffYet(Color),

    #[display("A {steps} from {from} does not reach off")]
    ShortOfOff { from: u8, steps: u8 },

    #[display("Cannot bear off from {from} with {steps}: a checker stands on a higher point")]
    HigherPointOccupied { from: u8, steps: u8 },

    #[display("Moving {steps} from {from} is legal on the board but does not use the dice fully")]
    ForcedPlay { from: u8, steps: u8 },

    #[display("Legal moves remain, play them before ending the turn")]
    MovesRemaining,
}
