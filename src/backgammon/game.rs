use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::backgammon::{
    BAR, Board, CHECKERS_PER_COLOR, Color, DiceSource, Error, GameOutcome, GameResult, HalfMove, Move,
    PlayAnalysis, Player, RuleError,
};

/// Where the game is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum TurnPhase {
    #[display("awaiting roll")]
    AwaitingRoll,
    #[display("awaiting move")]
    AwaitingMove,
    #[display("turn over")]
    TurnOver,
    #[display("game over")]
    GameOver,
}

/// Snapshot of the turn a front end shows to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub current_color: Color,
    pub dice_values: Vec<u8>,
    pub moves_left: usize,
    pub phase: TurnPhase,
    pub turn_number: u32,
}

/// Turn engine: sequences rolls, validates and applies moves, detects the
/// end of the game and scores it.
///
/// The cycle is `AwaitingRoll -> AwaitingMove -> TurnOver -> AwaitingRoll`
/// for the next player, until someone bears off all 15 checkers and the game
/// moves to `GameOver`.
#[derive(Debug, Clone)]
pub struct Game<D> {
    board: Board,
    dice: D,
    players: [Player; 2],
    current_color: Color,
    phase: TurnPhase,
    turn_number: u32,
    current_move: Option<Move>,
    history: Vec<Move>,
    result: Option<GameResult>,
}

impl<D: DiceSource> Game<D> {
    pub fn new(board: Board, dice: D, starting_color: Color) -> Self {
        Game {
            board,
            dice,
            players: [Player::new("White", Color::White), Player::new("Black", Color::Black)],
            current_color: starting_color,
            phase: TurnPhase::AwaitingRoll,
            turn_number: 1,
            current_move: None,
            history: Vec::new(),
            result: None,
        }
    }

    /// A game from the standard starting position, white to move.
    pub fn standard(dice: D) -> Self {
        Game::new(Board::new(), dice, Color::White)
    }

    /// Seats `player` on the side of their color.
    pub fn with_player(mut self, player: Player) -> Self {
        let index = player.color().index();
        self.players[index] = player;
        self
    }

    /// Starts the current player's turn, rolling if the dice source can roll.
    /// Goes straight to `TurnOver` when the roll cannot be played at all.
    #[instrument(skip(self), fields(color = %self.current_color, turn = self.turn_number))]
    pub fn start_turn(&mut self) -> Result<TurnState, Error> {
        match self.phase {
            TurnPhase::GameOver => return Err(RuleError::GameOver.into()),
            TurnPhase::AwaitingMove | TurnPhase::TurnOver => return Err(RuleError::TurnAlreadyStarted.into()),
            TurnPhase::AwaitingRoll => {}
        }

        if let Some(roller) = self.dice.roller() {
            let (a, b) = roller.roll();
            debug!(a, b, "rolled");
        }
        let dice = self.dice.available_moves();
        self.current_move = Some(Move::new(self.current_color, dice));

        self.phase = if self.analysis().has_plays() {
            TurnPhase::AwaitingMove
        } else {
            debug!("roll cannot be played");
            TurnPhase::TurnOver
        };
        Ok(self.state())
    }

    /// Plays one checker of the current color from `from` (0 for the bar)
    /// with the die `steps`.
    #[instrument(skip(self), fields(color = %self.current_color))]
    pub fn apply_player_move(&mut self, from: u8, steps: u8) -> Result<HalfMove, Error> {
        match self.phase {
            TurnPhase::GameOver => return Err(RuleError::GameOver.into()),
            TurnPhase::AwaitingRoll => return Err(RuleError::TurnNotStarted.into()),
            TurnPhase::TurnOver => return Err(RuleError::TurnOver.into()),
            TurnPhase::AwaitingMove => {}
        }

        let color = self.current_color;
        let available = self.dice.available_moves();
        if !available.contains(&steps) {
            return Err(RuleError::DieNotAvailable { die: steps, available }.into());
        }
        if self.board.has_checkers_in_bar(color) && from != BAR {
            return Err(RuleError::MustEnterFromBar(color).into());
        }

        let layout = self.board.layout();
        layout.check_half_move(color, from, steps)?;
        if !layout.analyze(color, &available).allows(from, steps) {
            return Err(RuleError::ForcedPlay { from, steps }.into());
        }

        let half_move = self.board.move_or_bear_off(color, from, steps)?;
        self.dice.use_move(steps)?;
        if let Some(current) = self.current_move.as_mut() {
            current.add_half_move(half_move);
        }
        debug!(?half_move, "applied");

        if self.board.count_checkers(color).off == CHECKERS_PER_COLOR {
            self.finish(color);
        } else if !self.analysis().has_plays() {
            self.phase = TurnPhase::TurnOver;
        }
        Ok(half_move)
    }

    /// Hands the dice to the other player. Refused while a legal move remains.
    #[instrument(skip(self), fields(color = %self.current_color, turn = self.turn_number))]
    pub fn end_turn(&mut self) -> Result<(), Error> {
        match self.phase {
            TurnPhase::GameOver => return Err(RuleError::GameOver.into()),
            TurnPhase::AwaitingRoll => return Err(RuleError::TurnNotStarted.into()),
            TurnPhase::AwaitingMove if self.analysis().has_plays() => {
                return Err(RuleError::MovesRemaining.into());
            }
            TurnPhase::AwaitingMove | TurnPhase::TurnOver => {}
        }

        if let Some(finished) = self.current_move.take() {
            self.history.push(finished);
        }
        self.current_color = self.current_color.opposite();
        self.turn_number += 1;
        self.phase = TurnPhase::AwaitingRoll;
        Ok(())
    }

    fn finish(&mut self, winner: Color) {
        let result = self.determine_outcome(winner);
        self.players[winner.index()].win_game(result.points);
        self.result = Some(result);
        self.phase = TurnPhase::GameOver;
        if let Some(finished) = self.current_move.take() {
            self.history.push(finished);
        }
        info!(winner = %winner, outcome = %result.outcome, points = result.points, "game over");
    }

    /// Scores the current board as a win for `winner`. Pure; the engine
    /// calls it once, when the 15th checker comes off.
    pub fn determine_outcome(&self, winner: Color) -> GameResult {
        GameResult::new(winner, GameOutcome::determine(&self.board.layout(), winner))
    }

    fn analysis(&self) -> PlayAnalysis {
        self.board
            .layout()
            .analyze(self.current_color, &self.dice.available_moves())
    }

    /// Half moves the current player may play next.
    pub fn legal_moves(&self) -> Vec<HalfMove> {
        match self.phase {
            TurnPhase::AwaitingMove => self.analysis().plays().to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn can_player_move(&self) -> bool {
        self.phase == TurnPhase::AwaitingMove
    }

    pub fn state(&self) -> TurnState {
        let dice_values = self.dice.available_moves();
        TurnState {
            current_color: self.current_color,
            moves_left: dice_values.len(),
            dice_values,
            phase: self.phase,
            turn_number: self.turn_number,
        }
    }
}

impl<D> Game<D> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Lets a host load values into a pre-loaded dice source between turns.
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current_color)
    }

    pub fn opponent_player(&self) -> &Player {
        self.player(self.current_color.opposite())
    }

    /// The turn in progress, if one has started.
    pub fn current_move(&self) -> Option<&Move> {
        self.current_move.as_ref()
    }

    /// Completed turns, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backgammon::{FixedDice, OFF};

    #[test]
    fn test_cannot_move_before_turn_starts() {
        let mut game = Game::standard(FixedDice::new(3, 1).unwrap());
        assert_eq!(
            game.apply_player_move(8, 3),
            Err(RuleError::TurnNotStarted.into())
        );
        assert_eq!(game.end_turn(), Err(RuleError::TurnNotStarted.into()));
    }

    #[test]
    fn test_opening_turn_cycle() {
        let mut game = Game::standard(FixedDice::new(3, 1).unwrap());
        let state = game.start_turn().unwrap();
        assert_eq!(state.phase, TurnPhase::AwaitingMove);
        assert_eq!(state.dice_values, vec![3, 1]);
        assert_eq!(game.start_turn(), Err(RuleError::TurnAlreadyStarted.into()));

        game.apply_player_move(8, 3).unwrap();
        assert_eq!(game.end_turn(), Err(RuleError::MovesRemaining.into()));
        game.apply_player_move(6, 1).unwrap();
        assert_eq!(game.phase(), TurnPhase::TurnOver);
        assert_eq!(game.apply_player_move(6, 1), Err(RuleError::TurnOver.into()));

        game.end_turn().unwrap();
        assert_eq!(game.current_color(), Color::Black);
        assert_eq!(game.turn_number(), 2);
        assert_eq!(game.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].len(), 2);
        assert_eq!(game.board().count_checkers_at(5, Color::White), Ok(2));
    }

    #[test]
    fn test_die_must_be_available() {
        let mut game = Game::standard(FixedDice::new(3, 1).unwrap());
        game.start_turn().unwrap();
        assert_eq!(
            game.apply_player_move(13, 5),
            Err(RuleError::DieNotAvailable { die: 5, available: vec![3, 1] }.into())
        );
    }

    #[test]
    fn test_board_errors_propagate() {
        let mut game = Game::standard(FixedDice::new(1, 2).unwrap());
        game.start_turn().unwrap();
        assert_eq!(game.apply_player_move(13, 1), Err(RuleError::PointBlocked(12).into()));
        assert_eq!(game.apply_player_move(30, 1), Err(Error::InvalidPosition(30)));
        assert_eq!(game.state().moves_left, 2);
    }

    #[test]
    fn test_shut_out_turn_is_over_at_once() {
        let mut board = Board::empty();
        board.set_count_at(BAR, Color::White, 1).unwrap();
        board.set_count_at(6, Color::White, 14).unwrap();
        for point in 19..=24 {
            board.set_count_at(point, Color::Black, 2).unwrap();
        }
        board.set_count_at(12, Color::Black, 3).unwrap();

        let mut game = Game::new(board, FixedDice::new(4, 2).unwrap(), Color::White);
        let state = game.start_turn().unwrap();
        assert_eq!(state.phase, TurnPhase::TurnOver);
        assert!(game.legal_moves().is_empty());
        game.end_turn().unwrap();
        assert_eq!(game.current_color(), Color::Black);
    }

    #[test]
    fn test_winner_gets_points() {
        let mut board = Board::empty();
        board.set_count_at(OFF, Color::White, 14).unwrap();
        board.set_count_at(1, Color::White, 1).unwrap();
        board.set_count_at(12, Color::Black, 15).unwrap();

        let mut game = Game::new(board, FixedDice::new(1, 5).unwrap(), Color::White)
            .with_player(Player::new("Ana", Color::White));
        game.start_turn().unwrap();
        game.apply_player_move(1, 1).unwrap();

        assert!(game.is_game_over());
        let result = game.result().unwrap();
        assert_eq!(result.outcome, GameOutcome::Gammon);
        assert_eq!(game.player(Color::White).name(), "Ana");
        assert_eq!(game.player(Color::White).score(), 2);
        assert_eq!(game.player(Color::White).games_won(), 1);
        assert_eq!(game.apply_player_move(1, 5), Err(RuleError::GameOver.into()));
        assert_eq!(game.end_turn(), Err(RuleError::GameOver.into()));
        assert!(game.legal_moves().is_empty());
    }
}
