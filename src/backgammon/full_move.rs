use std::{fmt::Debug, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::backgammon::{Color, HalfMove};

/// Everything one player did in one turn: the dice they had and the half
/// moves they played, in order.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    color: Color,
    dice: Vec<u8>,
    half_moves: Vec<HalfMove>,
}

impl Move {
    pub fn new(color: Color, dice: Vec<u8>) -> Self {
        Move {
            color,
            dice,
            half_moves: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Dice values available when the turn started.
    pub fn dice(&self) -> &[u8] {
        &self.dice
    }

    pub fn add_half_move(&mut self, half_move: HalfMove) {
        self.half_moves.push(half_move);
    }

    pub fn hits(&self) -> usize {
        self.half_moves.iter().filter(|half_move| half_move.is_hit()).count()
    }
}

impl Deref for Move {
    type Target = [HalfMove];

    fn deref(&self) -> &Self::Target {
        &self.half_moves
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move {} {:?}: ", self.color, self.dice)?;
        if self.half_moves.is_empty() {
            return write!(f, "no play");
        }
        for (i, half_move) in self.half_moves.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", half_move)?;
        }
        Ok(())
    }
}
