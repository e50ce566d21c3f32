use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::backgammon::Error;

/// Slot index of the shared bar.
pub const BAR: u8 = 0;
/// Slot index of the shared off tray.
pub const OFF: u8 = 25;
/// Number of addressable slots.
pub const SLOTS: usize = 26;

/// Typed view of a slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Bar,
    Point(u8),
    Off,
}

impl Position {
    pub fn index(&self) -> u8 {
        match self {
            Position::Bar => BAR,
            Position::Point(point) => *point,
            Position::Off => OFF,
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            BAR => Ok(Position::Bar),
            OFF => Ok(Position::Off),
            1..=24 => Ok(Position::Point(index)),
            _ => Err(Error::InvalidPosition(index)),
        }
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.index()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Bar => write!(f, "bar"),
            Position::Off => write!(f, "off"),
            Position::Point(point) => write!(f, "{}", point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_index() {
        assert_eq!(Position::try_from(0), Ok(Position::Bar));
        assert_eq!(Position::try_from(25), Ok(Position::Off));
        assert_eq!(Position::try_from(13), Ok(Position::Point(13)));
        assert_eq!(Position::try_from(26), Err(Error::InvalidPosition(26)));
        for index in 0..SLOTS as u8 {
            assert_eq!(Position::try_from(index).map(u8::from), Ok(index));
        }
    }
}
