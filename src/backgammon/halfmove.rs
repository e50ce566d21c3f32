use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::backgammon::{Color, Position};

/// One checker moved with one die.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfMove {
    color: Color,
    from: Position,
    to: Position,
    die: u8,
    hit: bool,
}

impl HalfMove {
    pub fn new(color: Color, from: Position, to: Position, die: u8, hit: bool) -> Self {
        HalfMove { color, from, to, die, hit }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn die(&self) -> u8 {
        self.die
    }

    /// Whether an opposing blot was sent to the bar.
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn is_bear_off(&self) -> bool {
        self.to == Position::Off
    }

    pub fn is_entry(&self) -> bool {
        self.from == Position::Bar
    }
}

impl Debug for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {} ({})", self.color, self.from, self.to, self.die)?;
        if self.hit {
            write!(f, "*")?;
        }
        Ok(())
    }
}
