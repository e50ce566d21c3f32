//! Backgammon rules engine.
//!
//! [`backgammon::Board`] holds the checkers and applies single moves,
//! [`backgammon::Game`] runs the turn cycle on top of it and decides the
//! winner, and [`simulation`] plays whole games headlessly through the same
//! API. Positions are addressed as bar = 0, points 1..=24, off = 25.

pub mod backgammon;
pub mod simulation;
