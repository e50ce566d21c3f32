//! Turn sequencing, dice usage and scoring through the public game API.

use backgammon_rules::backgammon::{
    BAR, Board, Color, Dice, FixedDice, Game, GameOutcome, OFF, Player, RuleError, TurnPhase, TurnState,
};

fn board_with(white: &[(u8, u8)], black: &[(u8, u8)]) -> Board {
    let mut board = Board::empty();
    for &(index, count) in white {
        board.set_count_at(index, Color::White, count).unwrap();
    }
    for &(index, count) in black {
        board.set_count_at(index, Color::Black, count).unwrap();
    }
    board
}

fn started(board: Board, a: u8, b: u8, color: Color) -> Game<FixedDice> {
    let mut game = Game::new(board, FixedDice::new(a, b).unwrap(), color);
    game.start_turn().unwrap();
    game
}

#[test]
fn test_bar_priority_blocks_other_moves() {
    let board = board_with(&[(13, 15)], &[(BAR, 1), (1, 14)]);
    let mut game = started(board, 3, 4, Color::Black);

    // 1 -> 4 would be legal without the checker on the bar
    assert_eq!(
        game.apply_player_move(1, 3),
        Err(RuleError::MustEnterFromBar(Color::Black).into())
    );
    assert_eq!(
        game.apply_player_move(1, 4),
        Err(RuleError::MustEnterFromBar(Color::Black).into())
    );

    let entry = game.apply_player_move(BAR, 3).unwrap();
    assert!(entry.is_entry());
    assert_eq!(game.board().count_checkers_at(3, Color::Black), Ok(1));
    game.apply_player_move(1, 4).unwrap();
}

#[test]
fn test_only_playable_die_can_be_used() {
    let board = board_with(&[(BAR, 1)], &[(23, 2)]);
    let mut game = started(board, 2, 5, Color::White);
    assert_eq!(game.apply_player_move(BAR, 2), Err(RuleError::PointBlocked(23).into()));
    game.apply_player_move(BAR, 5).unwrap();
    assert_eq!(game.board().count_checkers_at(20, Color::White), Ok(1));
}

#[test]
fn test_higher_die_is_forced() {
    // 13 -> 10 and 13 -> 7 both work, but each lands one die short of the blocked 4 point
    let board = board_with(&[(13, 1), (OFF, 14)], &[(4, 2), (20, 13)]);
    let mut game = started(board, 3, 6, Color::White);
    assert_eq!(
        game.apply_player_move(13, 3),
        Err(RuleError::ForcedPlay { from: 13, steps: 3 }.into())
    );
    let legal = game.legal_moves();
    assert_eq!(legal.len(), 1);
    assert_eq!(legal[0].die(), 6);

    game.apply_player_move(13, 6).unwrap();
    assert_eq!(game.phase(), TurnPhase::TurnOver);
    assert_eq!(game.state().dice_values, vec![3]);
    game.end_turn().unwrap();
}

#[test]
fn test_all_playable_dice_must_be_used() {
    let board = board_with(&[(BAR, 2)], &[]);
    let mut game = started(board, 3, 5, Color::White);

    game.apply_player_move(BAR, 3).unwrap();
    assert_eq!(game.end_turn(), Err(RuleError::MovesRemaining.into()));
    game.apply_player_move(BAR, 5).unwrap();
    game.end_turn().unwrap();
    assert_eq!(game.current_color(), Color::Black);
}

#[test]
fn test_doubles_play_four_times() {
    let board = board_with(&[(BAR, 3)], &[]);
    let mut game = started(board, 4, 4, Color::White);
    assert_eq!(game.state().moves_left, 4);

    game.apply_player_move(BAR, 4).unwrap();
    game.apply_player_move(BAR, 4).unwrap();
    assert_eq!(game.end_turn(), Err(RuleError::MovesRemaining.into()));
    game.apply_player_move(BAR, 4).unwrap();
    game.apply_player_move(21, 4).unwrap();
    assert_eq!(game.state().moves_left, 0);
    game.end_turn().unwrap();
}

#[test]
fn test_bearing_off_consumes_the_die() {
    let board = board_with(&[(1, 1), (2, 14)], &[(12, 15)]);
    let mut game = started(board, 1, 3, Color::White);
    game.apply_player_move(1, 1).unwrap();
    assert!(!game.state().dice_values.contains(&1));
    assert_eq!(game.board().count_checkers_at(OFF, Color::White), Ok(1));
}

fn finish_white(black: &[(u8, u8)], dice: (u8, u8)) -> Game<FixedDice> {
    let board = board_with(&[(OFF, 14), (1, 1)], black);
    let mut game = started(board, dice.0, dice.1, Color::White);
    game.apply_player_move(1, 1).unwrap();
    game
}

#[test]
fn test_victory_single() {
    let game = finish_white(&[(OFF, 1), (12, 14)], (1, 3));
    assert!(game.is_game_over());
    let result = game.result().unwrap();
    assert_eq!(result.winner, Color::White);
    assert_eq!(result.outcome, GameOutcome::Single);
    assert_eq!(result.points, 1);
}

#[test]
fn test_victory_gammon() {
    let game = finish_white(&[(12, 15)], (1, 5));
    assert_eq!(game.result().unwrap().outcome, GameOutcome::Gammon);
    assert_eq!(game.result().unwrap().points, 2);
}

#[test]
fn test_victory_backgammon_by_bar() {
    let game = finish_white(&[(BAR, 1), (12, 14)], (1, 2));
    let result = game.result().unwrap();
    assert_eq!((result.outcome, result.points), (GameOutcome::Backgammon, 3));
    assert_eq!(game.phase(), TurnPhase::GameOver);
}

#[test]
fn test_victory_backgammon_by_checker_in_winner_home() {
    let game = finish_white(&[(3, 1), (12, 14)], (1, 4));
    assert_eq!(game.result().unwrap().outcome, GameOutcome::Backgammon);
}

#[test]
fn test_outcome_is_deterministic() {
    let game = finish_white(&[(BAR, 1), (12, 14)], (1, 6));
    let first = game.determine_outcome(Color::White);
    for _ in 0..5 {
        assert_eq!(game.determine_outcome(Color::White), first);
    }
    assert_eq!(Some(first), game.result());
}

#[test]
fn test_black_wins_and_scores() {
    // a white checker left in black's home makes it a backgammon
    let board = board_with(&[(12, 14), (20, 1)], &[(OFF, 14), (24, 1)]);
    let mut game = Game::new(board, FixedDice::new(6, 2).unwrap(), Color::Black)
        .with_player(Player::new("Bea", Color::Black));
    game.start_turn().unwrap();
    game.apply_player_move(24, 6).unwrap();
    let result = game.result().unwrap();
    assert_eq!(result.winner, Color::Black);
    assert_eq!(result.outcome, GameOutcome::Backgammon);
    assert_eq!(game.player(Color::Black).score(), 3);
    assert_eq!(game.player(Color::White).score(), 0);
}

#[test]
fn test_pre_loaded_dice_are_reloaded_between_turns() {
    let mut game = Game::standard(FixedDice::new(6, 5).unwrap());
    game.start_turn().unwrap();
    game.apply_player_move(24, 6).unwrap();
    game.apply_player_move(18, 5).unwrap();
    game.end_turn().unwrap();

    game.dice_mut().reset(2, 1).unwrap();
    let state = game.start_turn().unwrap();
    assert_eq!(
        state,
        TurnState {
            current_color: Color::Black,
            dice_values: vec![2, 1],
            moves_left: 2,
            phase: TurnPhase::AwaitingMove,
            turn_number: 2,
        }
    );
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["current_color"], "black");
}

#[test]
fn test_rolling_dice_are_rolled_at_turn_start() {
    let mut game = Game::standard(Dice::seeded(42));
    assert!(game.state().dice_values.is_empty());
    let state = game.start_turn().unwrap();
    let expected = match game.dice().last_roll() {
        Some((a, b)) if a == b => 4,
        Some(_) => 2,
        None => panic!("dice were not rolled"),
    };
    assert_eq!(state.moves_left, expected);
    assert_eq!(state.phase, TurnPhase::AwaitingMove);
    assert!(!game.legal_moves().is_empty());
}
