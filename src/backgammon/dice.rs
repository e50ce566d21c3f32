use std::fmt::Display;

use rand::{
    Rng, SeedableRng,
    rngs::{StdRng, ThreadRng},
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::backgammon::{Error, RuleError};

/// Something that can produce a fresh pair of dice.
pub trait RollDice {
    fn roll(&mut self) -> (u8, u8);
}

/// What the turn engine needs from a dice source.
///
/// Rolling is an optional capability exposed through [`DiceSource::roller`].
/// Sources that are loaded from outside (scripted tests, a UI that shows
/// physical dice) keep the default `None` and the engine uses whatever
/// values are loaded when the turn starts.
pub trait DiceSource {
    /// Unused values of the current roll. A double yields up to four equal values.
    fn available_moves(&self) -> Vec<u8>;

    /// Marks one instance of `value` as consumed.
    fn use_move(&mut self, value: u8) -> Result<(), Error>;

    fn has_moves(&self) -> bool {
        !self.available_moves().is_empty()
    }

    fn roller(&mut self) -> Option<&mut dyn RollDice> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceUsage {
    BothAvailable,
    OnlyFirstAvailable,
    OnlySecondAvailable,
    BothUsed,
}

/// Two dice and which of them have been played. A double can be played four times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceRoll {
    Double {
        value: u8,
        used: u8,
    },
    Single {
        value_1: u8,
        value_2: u8,
        used: DiceUsage,
    },
}

impl DiceRoll {
    pub fn new(a: u8, b: u8) -> Result<Self, Error> {
        for value in [a, b] {
            if !(1..=6).contains(&value) {
                return Err(Error::InvalidDieValue(value));
            }
        }
        if a == b {
            Ok(DiceRoll::Double { value: a, used: 0 })
        } else {
            Ok(DiceRoll::Single { value_1: a, value_2: b, used: DiceUsage::BothAvailable })
        }
    }

    pub fn values(&self) -> (u8, u8) {
        match *self {
            DiceRoll::Double { value, .. } => (value, value),
            DiceRoll::Single { value_1, value_2, .. } => (value_1, value_2),
        }
    }

    pub fn is_double(&self) -> bool {
        matches!(self, DiceRoll::Double { .. })
    }

    pub fn all_used(&self) -> bool {
        match *self {
            DiceRoll::Double { used, .. } => used >= 4,
            DiceRoll::Single { used, .. } => used == DiceUsage::BothUsed,
        }
    }

    pub fn available(&self) -> Vec<u8> {
        match *self {
            DiceRoll::Double { value, used } => vec![value; 4usize.saturating_sub(used as usize)],
            DiceRoll::Single { value_1, value_2, used } => match used {
                DiceUsage::BothAvailable => vec![value_1, value_2],
                DiceUsage::OnlyFirstAvailable => vec![value_1],
                DiceUsage::OnlySecondAvailable => vec![value_2],
                DiceUsage::BothUsed => Vec::new(),
            },
        }
    }

    /// Returns the roll with one `die` consumed, or `None` if no such die is left.
    pub fn use_die(&self, die: u8) -> Option<DiceRoll> {
        let mut dice = *self;
        match &mut dice {
            DiceRoll::Double { value, used } => {
                if *value != die || *used >= 4 {
                    return None;
                }
                *used += 1;
            }
            DiceRoll::Single { value_1, value_2, used } => {
                *used = match *used {
                    DiceUsage::BothAvailable if *value_1 == die => DiceUsage::OnlySecondAvailable,
                    DiceUsage::BothAvailable if *value_2 == die => DiceUsage::OnlyFirstAvailable,
                    DiceUsage::OnlyFirstAvailable if *value_1 == die => DiceUsage::BothUsed,
                    DiceUsage::OnlySecondAvailable if *value_2 == die => DiceUsage::BothUsed,
                    _ => return None,
                };
            }
        }
        Some(dice)
    }
}

impl Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.values();
        write!(f, "{}/{}", a, b)
    }
}

fn consume(roll: &mut Option<DiceRoll>, value: u8) -> Result<(), Error> {
    if !(1..=6).contains(&value) {
        return Err(Error::InvalidDieValue(value));
    }
    let available = roll.map(|r| r.available()).unwrap_or_default();
    match roll.and_then(|r| r.use_die(value)) {
        Some(next) => {
            *roll = Some(next);
            Ok(())
        }
        None => Err(RuleError::DieNotAvailable { die: value, available }.into()),
    }
}

/// Rollable dice backed by a random number generator.
#[derive(Debug, Clone)]
pub struct Dice<R = ThreadRng> {
    rng: R,
    current: Option<DiceRoll>,
}

impl Dice {
    pub fn new() -> Self {
        Dice::from_rng(rand::rng())
    }
}

impl Default for Dice {
    fn default() -> Self {
        Dice::new()
    }
}

impl Dice<StdRng> {
    /// Deterministic dice: the same seed always rolls the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Dice::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dice<R> {
    pub fn from_rng(rng: R) -> Self {
        Dice { rng, current: None }
    }

    /// The most recent roll, including its usage state.
    pub fn current(&self) -> Option<DiceRoll> {
        self.current
    }

    pub fn last_roll(&self) -> Option<(u8, u8)> {
        self.current.map(|roll| roll.values())
    }

    pub fn is_double(&self) -> bool {
        self.current.is_some_and(|roll| roll.is_double())
    }
}

impl<R: Rng> RollDice for Dice<R> {
    fn roll(&mut self) -> (u8, u8) {
        let a = self.rng.random_range(1..=6);
        let b = self.rng.random_range(1..=6);
        self.current = Some(if a == b {
            DiceRoll::Double { value: a, used: 0 }
        } else {
            DiceRoll::Single { value_1: a, value_2: b, used: DiceUsage::BothAvailable }
        });
        trace!(a, b, "rolled dice");
        (a, b)
    }
}

impl<R: Rng> DiceSource for Dice<R> {
    fn available_moves(&self) -> Vec<u8> {
        self.current.map(|roll| roll.available()).unwrap_or_default()
    }

    fn use_move(&mut self, value: u8) -> Result<(), Error> {
        consume(&mut self.current, value)
    }

    fn roller(&mut self) -> Option<&mut dyn RollDice> {
        Some(self)
    }
}

/// Pre-loaded dice without a roll capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedDice {
    current: Option<DiceRoll>,
}

impl FixedDice {
    pub fn new(a: u8, b: u8) -> Result<Self, Error> {
        Ok(FixedDice { current: Some(DiceRoll::new(a, b)?) })
    }

    pub fn empty() -> Self {
        FixedDice { current: None }
    }

    /// Loads a new pair, discarding whatever was left of the previous one.
    pub fn reset(&mut self, a: u8, b: u8) -> Result<(), Error> {
        self.current = Some(DiceRoll::new(a, b)?);
        Ok(())
    }

    pub fn current(&self) -> Option<DiceRoll> {
        self.current
    }
}

impl DiceSource for FixedDice {
    fn available_moves(&self) -> Vec<u8> {
        self.current.map(|roll| roll.available()).unwrap_or_default()
    }

    fn use_move(&mut self, value: u8) -> Result<(), Error> {
        consume(&mut self.current, value)
    }
}
