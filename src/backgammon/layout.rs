use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::backgammon::{
    BAR, Color, Error, HalfMove, OFF, Position, RuleError, SLOTS,
};

/// Checkers per color.
pub const CHECKERS_PER_COLOR: u8 = 15;

/// Per-color checker counts for all 26 slots.
///
/// This is the copyable shadow of [`crate::backgammon::Board`]. Every rule
/// check lives here, so the board, the turn engine and the legality scan all
/// validate moves the same way. [`Layout`] does not track checker identity;
/// use [`crate::backgammon::Board`] for anything a player sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
    counts: [[u8; SLOTS]; 2],
}

impl Layout {
    pub fn empty() -> Self {
        Layout { counts: [[0; SLOTS]; 2] }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let mut layout = Layout::empty();
        for (point, count) in [(24, 2), (13, 5), (8, 3), (6, 5)] {
            layout.set(Color::White, point, count);
        }
        for (point, count) in [(1, 2), (12, 5), (17, 3), (19, 5)] {
            layout.set(Color::Black, point, count);
        }
        layout
    }

    /// Indices must be below [`SLOTS`].
    pub(crate) fn count(&self, color: Color, index: u8) -> u8 {
        self.counts[color.index()][index as usize]
    }

    /// Overwrites a slot count. Indices must be below [`SLOTS`].
    pub(crate) fn set(&mut self, color: Color, index: u8, count: u8) {
        self.counts[color.index()][index as usize] = count;
    }

    pub fn bar(&self, color: Color) -> u8 {
        self.count(color, BAR)
    }

    pub fn off(&self, color: Color) -> u8 {
        self.count(color, OFF)
    }

    /// Saturates at `u8::MAX` for layouts that were never validated.
    pub fn on_board(&self, color: Color) -> u8 {
        (1..=24).fold(0u8, |sum, point| sum.saturating_add(self.count(color, point)))
    }

    /// Saturates like [`Layout::on_board`].
    pub fn total(&self, color: Color) -> u8 {
        self.counts[color.index()]
            .iter()
            .fold(0u8, |sum, &count| sum.saturating_add(count))
    }

    /// Checkers of `color` at a slot, or [`Error::InvalidPosition`] past the off tray.
    pub fn checkers_at(&self, color: Color, index: u8) -> Result<u8, Error> {
        Position::try_from(index)?;
        Ok(self.count(color, index))
    }

    /// No checker of `color` on the bar or on a point outside its home.
    pub fn all_home(&self, color: Color) -> bool {
        self.bar(color) == 0
            && (1..=24)
                .filter(|&point| !color.is_home(point))
                .all(|point| self.count(color, point) == 0)
    }

    /// Pips left to bear every checker off. A checker on the bar counts 25.
    pub fn pip_count(&self, color: Color) -> u32 {
        let on_points: u32 = (1..=24)
            .map(|point| self.count(color, point) as u32 * color.pips_to_off(point) as u32)
            .sum();
        on_points + self.bar(color) as u32 * 25
    }

    fn check_origin(&self, color: Color, from: u8, steps: u8) -> Result<(), Error> {
        Position::try_from(from)?;
        if !(1..=6).contains(&steps) {
            return Err(Error::InvalidDieValue(steps));
        }
        if from == OFF {
            return Err(RuleError::CannotMoveFromOff.into());
        }
        if self.count(color, from) == 0 {
            return Err(RuleError::NoCheckerAt { color, position: from }.into());
        }
        Ok(())
    }

    fn has_checker_farther(&self, color: Color, from: u8) -> bool {
        let pips = color.pips_to_off(from);
        (1..=24)
            .filter(|&point| color.pips_to_off(point) > pips)
            .any(|point| self.count(color, point) > 0)
    }

    /// Validates a move that stays on the board (including entry from the bar).
    pub fn check_move(&self, color: Color, from: u8, steps: u8) -> Result<HalfMove, Error> {
        self.check_origin(color, from, steps)?;
        let origin = if from == BAR { color.entry_origin() } else { from };
        let destination = origin as i8 + steps as i8 * color.direction();
        if !(1..=24).contains(&destination) {
            return Err(RuleError::MustBearOff { from, steps }.into());
        }
        let destination = destination as u8;
        let opposing = self.count(color.opposite(), destination);
        if opposing >= 2 {
            return Err(RuleError::PointBlocked(destination).into());
        }
        Ok(HalfMove::new(
            color,
            Position::try_from(from)?,
            Position::Point(destination),
            steps,
            opposing == 1,
        ))
    }

    /// Validates bearing a checker off from `from` with a die of `steps`.
    pub fn check_bear_off(&self, color: Color, from: u8, steps: u8) -> Result<HalfMove, Error> {
        self.check_origin(color, from, steps)?;
        if from == BAR || !self.all_home(color) {
            return Err(RuleError::CannotBearOffYet(color).into());
        }
        let pips = color.pips_to_off(from);
        if steps < pips {
            return Err(RuleError::ShortOfOff { from, steps }.into());
        }
        if steps > pips && self.has_checker_farther(color, from) {
            return Err(RuleError::HigherPointOccupied { from, steps }.into());
        }
        Ok(HalfMove::new(color, Position::Point(from), Position::Off, steps, false))
    }

    pub fn can_bear_off_from(&self, color: Color, from: u8, steps: u8) -> bool {
        self.check_bear_off(color, from, steps).is_ok()
    }

    /// Validates a move, bearing off when the die carries the checker past the board.
    pub fn check_half_move(&self, color: Color, from: u8, steps: u8) -> Result<HalfMove, Error> {
        match self.check_move(color, from, steps) {
            Err(Error::Rule(RuleError::MustBearOff { .. })) => self.check_bear_off(color, from, steps),
            other => other,
        }
    }

    /// Applies an already validated half move.
    pub fn apply(&mut self, half_move: &HalfMove) {
        let color = half_move.color();
        let from = half_move.from().index();
        let to = half_move.to().index();
        self.set(color, from, self.count(color, from) - 1);
        if half_move.is_hit() {
            let opponent = color.opposite();
            self.set(opponent, to, self.count(opponent, to) - 1);
            self.set(opponent, BAR, self.count(opponent, BAR) + 1);
        }
        self.set(color, to, self.count(color, to) + 1);
    }

    fn after(&self, half_move: &HalfMove) -> Layout {
        let mut next = *self;
        next.apply(half_move);
        next
    }

    /// Every legal half move of `color` for a single die. Checkers on the bar
    /// must enter before anything else moves.
    pub fn half_moves(&self, color: Color, die: u8) -> Vec<HalfMove> {
        if self.bar(color) > 0 {
            return self.check_move(color, BAR, die).into_iter().collect();
        }
        (1..=24)
            .filter(|&point| self.count(color, point) > 0)
            .filter_map(|point| self.check_half_move(color, point, die).ok())
            .collect()
    }

    /// Finds the half moves `color` may start with given the unused `dice`.
    ///
    /// A player has to use as many dice as the position allows, so only the
    /// first steps of the longest playable sequences are legal. When just one
    /// die of a non-double can be used and either one could, the higher die
    /// has to be played.
    pub fn analyze(&self, color: Color, dice: &[u8]) -> PlayAnalysis {
        let mut remaining = dice.to_vec();
        remaining.sort_unstable();
        let mut memo = HashMap::new();
        let mut max_dice = 0;
        let mut plays: Vec<HalfMove> = Vec::new();

        for die in distinct(&remaining) {
            let rest = without_one(&remaining, die);
            for half_move in self.half_moves(color, die) {
                let depth = 1 + self.after(&half_move).max_dice(color, &rest, &mut memo);
                if depth > max_dice {
                    max_dice = depth;
                    plays.clear();
                }
                if depth == max_dice {
                    plays.push(half_move);
                }
            }
        }

        // a lower die that reaches the same position as the higher one is the same play
        if max_dice == 1 {
            if let Some(highest) = plays.iter().map(|play| play.die()).max() {
                let required: Vec<Layout> = plays
                    .iter()
                    .filter(|play| play.die() == highest)
                    .map(|play| self.after(play))
                    .collect();
                plays.retain(|play| play.die() == highest || required.contains(&self.after(play)));
            }
        }

        PlayAnalysis { max_dice, plays }
    }

    fn max_dice(&self, color: Color, dice: &[u8], memo: &mut HashMap<(Layout, Vec<u8>), usize>) -> usize {
        if dice.is_empty() {
            return 0;
        }
        if let Some(&cached) = memo.get(&(*self, dice.to_vec())) {
            return cached;
        }

        let mut best = 0;
        'search: for die in distinct(dice) {
            let rest = without_one(dice, die);
            for half_move in self.half_moves(color, die) {
                best = best.max(1 + self.after(&half_move).max_dice(color, &rest, memo));
                if best == dice.len() {
                    break 'search;
                }
            }
        }

        memo.insert((*self, dice.to_vec()), best);
        best
    }

    /// Checks the board invariants: 15 checkers per color and no interior
    /// point shared by both colors.
    pub fn validate(&self) -> Result<(), Error> {
        for color in Color::ALL {
            if let Some(index) = (0..SLOTS as u8).find(|&index| self.count(color, index) > CHECKERS_PER_COLOR) {
                return Err(Error::InvalidLayout(format!(
                    "{} has {} checkers at {}",
                    color,
                    self.count(color, index),
                    index
                )));
            }
            let total = self.total(color);
            if total != CHECKERS_PER_COLOR {
                return Err(Error::InvalidLayout(format!(
                    "{} has {} checkers, expected {}",
                    color, total, CHECKERS_PER_COLOR
                )));
            }
        }
        if let Some(point) =
            (1..=24).find(|&point| self.count(Color::White, point) > 0 && self.count(Color::Black, point) > 0)
        {
            return Err(Error::InvalidLayout(format!("point {} holds both colors", point)));
        }
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::standard()
    }
}

/// Result of [`Layout::analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayAnalysis {
    max_dice: usize,
    plays: Vec<HalfMove>,
}

impl PlayAnalysis {
    /// How many dice the best sequence uses.
    pub fn max_dice(&self) -> usize {
        self.max_dice
    }

    pub fn plays(&self) -> &[HalfMove] {
        &self.plays
    }

    pub fn has_plays(&self) -> bool {
        !self.plays.is_empty()
    }

    pub fn allows(&self, from: u8, die: u8) -> bool {
        self.plays
            .iter()
            .any(|play| play.from().index() == from && play.die() == die)
    }
}

// `dice` is sorted
fn distinct(dice: &[u8]) -> Vec<u8> {
    let mut values = dice.to_vec();
    values.dedup();
    values
}

fn without_one(dice: &[u8], die: u8) -> Vec<u8> {
    let mut rest = dice.to_vec();
    if let Some(index) = rest.iter().position(|&value| value == die) {
        rest.remove(index);
    }
    rest
}
