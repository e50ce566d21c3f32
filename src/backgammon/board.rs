use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backgammon::{
    BAR, Checker, Color, Error, HalfMove, Layout, Position, RuleError, SLOTS,
};

/// Where a color's checkers are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckerCounts {
    pub board: u8,
    pub bar: u8,
    pub off: u8,
}

impl CheckerCounts {
    pub fn total(&self) -> u8 {
        self.board.saturating_add(self.bar).saturating_add(self.off)
    }
}

/// The playing surface: 24 points plus the shared bar (slot 0) and the
/// shared off tray (slot 25), each holding a stack of [`Checker`]s.
///
/// Rule checks are delegated to [`Layout`]; every mutating operation
/// validates first and only then touches the stacks, so a failed call leaves
/// the board unchanged.
#[derive(Debug, Clone)]
pub struct Board {
    points: [Vec<Checker>; SLOTS],
    next_id: u16,
}

impl Board {
    /// Creates a new board with the standard starting position.
    pub fn new() -> Self {
        Board::build(&Layout::standard())
    }

    /// Creates a board with no checkers on it. Used to set up positions.
    pub fn empty() -> Self {
        Board {
            points: std::array::from_fn(|_| Vec::new()),
            next_id: 0,
        }
    }

    /// Restores a board from a layout, e.g. one produced by [`Board::layout`]
    /// and persisted by the host.
    pub fn from_layout(layout: &Layout) -> Result<Self, Error> {
        layout.validate()?;
        Ok(Board::build(layout))
    }

    fn build(layout: &Layout) -> Self {
        let mut board = Board::empty();
        for index in 0..SLOTS as u8 {
            for color in Color::ALL {
                for _ in 0..layout.count(color, index) {
                    board.push_new(index, color);
                }
            }
        }
        board
    }

    fn push_new(&mut self, index: u8, color: Color) {
        let checker = Checker::new(color, self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.points[index as usize].push(checker);
    }

    /// Checkers at a slot, bar = 0, off = 25.
    pub fn get_point(&self, index: u8) -> Result<&[Checker], Error> {
        Position::try_from(index)?;
        Ok(&self.points[index as usize])
    }

    pub fn count_checkers_at(&self, index: u8, color: Color) -> Result<u8, Error> {
        Ok(self
            .get_point(index)?
            .iter()
            .filter(|checker| checker.color() == color)
            .count() as u8)
    }

    /// Replaces the `color` checkers at `index` with `count` fresh ones.
    /// Meant for setting up positions; it does not enforce the 15-checker total.
    pub fn set_count_at(&mut self, index: u8, color: Color, count: u8) -> Result<(), Error> {
        Position::try_from(index)?;
        self.points[index as usize].retain(|checker| checker.color() != color);
        for _ in 0..count {
            self.push_new(index, color);
        }
        Ok(())
    }

    /// Compact copy of the per-color counts.
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::empty();
        for (index, stack) in self.points.iter().enumerate() {
            for checker in stack {
                let color = checker.color();
                layout.set(color, index as u8, layout.count(color, index as u8).saturating_add(1));
            }
        }
        layout
    }

    /// Moves one checker of `color` from `from` (0 for the bar) by `steps`
    /// pips, hitting a lone opposing checker at the destination.
    pub fn move_checker(&mut self, color: Color, from: u8, steps: u8) -> Result<HalfMove, Error> {
        let half_move = self.layout().check_move(color, from, steps)?;
        self.apply(&half_move)?;
        Ok(half_move)
    }

    pub fn can_bear_off_from(&self, color: Color, from: u8, steps: u8) -> bool {
        self.layout().can_bear_off_from(color, from, steps)
    }

    pub fn bear_off_checker(&mut self, color: Color, from: u8, steps: u8) -> Result<HalfMove, Error> {
        let half_move = self.layout().check_bear_off(color, from, steps)?;
        self.apply(&half_move)?;
        Ok(half_move)
    }

    /// Bears off when the die carries the checker off the board and bearing
    /// off is allowed, moves it otherwise.
    pub fn move_or_bear_off(&mut self, color: Color, from: u8, steps: u8) -> Result<HalfMove, Error> {
        let half_move = self.layout().check_half_move(color, from, steps)?;
        self.apply(&half_move)?;
        Ok(half_move)
    }

    fn apply(&mut self, half_move: &HalfMove) -> Result<(), Error> {
        let color = half_move.color();
        let from = half_move.from().index() as usize;
        let to = half_move.to().index() as usize;

        let mover = find(&self.points[from], color).ok_or(RuleError::NoCheckerAt {
            color,
            position: from as u8,
        })?;
        let blot = if half_move.is_hit() {
            Some(find(&self.points[to], color.opposite()).ok_or(RuleError::NoCheckerAt {
                color: color.opposite(),
                position: to as u8,
            })?)
        } else {
            None
        };

        if let Some(blot) = blot {
            let hit = self.points[to].remove(blot);
            self.points[BAR as usize].push(hit);
            debug!(point = to, color = %hit.color(), "checker hit and sent to the bar");
        }
        let checker = self.points[from].remove(mover);
        self.points[to].push(checker);
        Ok(())
    }

    pub fn count_checkers(&self, color: Color) -> CheckerCounts {
        let layout = self.layout();
        CheckerCounts {
            board: layout.on_board(color),
            bar: layout.bar(color),
            off: layout.off(color),
        }
    }

    pub fn get_checkers_in_bar(&self, color: Color) -> Vec<Checker> {
        self.points[BAR as usize]
            .iter()
            .filter(|checker| checker.color() == color)
            .copied()
            .collect()
    }

    pub fn has_checkers_in_bar(&self, color: Color) -> bool {
        self.points[BAR as usize].iter().any(|checker| checker.color() == color)
    }

    pub fn get_home_board_range(&self, color: Color) -> (u8, u8) {
        color.home_range()
    }

    pub fn all_checkers_in_home_board(&self, color: Color) -> bool {
        self.layout().all_home(color)
    }

    pub fn pip_count(&self, color: Color) -> u32 {
        self.layout().pip_count(color)
    }
}

fn find(stack: &[Checker], color: Color) -> Option<usize> {
    stack.iter().rposition(|checker| checker.color() == color)
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let layout = self.layout();
        let cell = |point: u8| match (layout.count(Color::White, point), layout.count(Color::Black, point)) {
            (0, 0) => "  .".to_string(),
            (white, 0) => format!("{:>3}", format!("W{}", white)),
            (_, black) => format!("{:>3}", format!("B{}", black)),
        };

        for point in 13..=24 {
            write!(f, "{:>3}", point)?;
        }
        writeln!(f)?;
        for point in 13..=24 {
            write!(f, "{}", cell(point))?;
        }
        writeln!(f)?;
        for point in (1..=12).rev() {
            write!(f, "{}", cell(point))?;
        }
        writeln!(f)?;
        for point in (1..=12).rev() {
            write!(f, "{:>3}", point)?;
        }
        writeln!(f)?;
        write!(
            f,
            "bar: W{} B{} | off: W{} B{}",
            layout.bar(Color::White),
            layout.bar(Color::Black),
            layout.off(Color::White),
            layout.off(Color::Black),
        )
    }
}
