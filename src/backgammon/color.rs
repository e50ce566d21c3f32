use serde::{Deserialize, Serialize};

/// Checker color. White moves from 24 down to 1, black from 1 up to 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[display("white")]
    White,
    #[display("black")]
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color arrays.
    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Sign of the index change when a checker of this color advances.
    pub fn direction(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Inclusive range of home points.
    pub fn home_range(&self) -> (u8, u8) {
        match self {
            Color::White => (1, 6),
            Color::Black => (19, 24),
        }
    }

    pub fn is_home(&self, point: u8) -> bool {
        let (start, end) = self.home_range();
        (start..=end).contains(&point)
    }

    /// Virtual point a checker on the bar moves from.
    /// White enters as if from 25, black as if from 0.
    pub fn entry_origin(&self) -> u8 {
        match self {
            Color::White => 25,
            Color::Black => 0,
        }
    }

    /// Number of pips from `point` to the off tray.
    pub fn pips_to_off(&self, point: u8) -> u8 {
        match self {
            Color::White => point,
            Color::Black => 25 - point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_lead_home() {
        for color in Color::ALL {
            let (start, end) = color.home_range();
            let origin = color.entry_origin() as i8;
            // entering with 1..6 always lands in the opponent's home
            for die in 1..=6 {
                let landing = (origin + die * color.direction()) as u8;
                assert!(color.opposite().is_home(landing));
                assert!(!color.is_home(landing));
            }
            assert_eq!(color.pips_to_off(start).min(color.pips_to_off(end)), 1);
        }
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite().opposite(), Color::Black);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::White.to_string(), "white");
        assert_eq!(Color::Black.to_string(), "black");
    }
}
