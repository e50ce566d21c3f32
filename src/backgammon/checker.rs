use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::backgammon::Color;

/// A single checker. The color never changes. The id is handed out by the
/// board that created the checker and stays with it while it moves, so a UI
/// can track individual pieces. Rules only look at the color, which is also
/// what equality compares.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Checker {
    color: Color,
    id: u16,
}

impl Checker {
    pub fn new(color: Color, id: u16) -> Self {
        Checker { color, id }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn id(&self) -> u16 {
        self.id
    }
}

impl PartialEq for Checker {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for Checker {}

impl Hash for Checker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
    }
}
