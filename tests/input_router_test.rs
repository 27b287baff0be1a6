//! Tests for directional key routing.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use grid_masters::{InputRouter, KeyRoute};
use grid_masters_core::{
    Board, Direction, MazeField, MazeLevel, MovePlan, Position, PuzzleField, PuzzleLevel,
    SessionController, SessionStatus, SignalLog,
};
use tokio::time::Instant;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn corridor() -> SessionController<MazeField> {
    let mut session = SessionController::new(Arc::new(SignalLog::default()));
    session.load(MazeLevel::new(
        1,
        "Corridor",
        vec![vec![0, 0, 0], vec![1, 1, 0]],
        Position::new(0, 0),
        Position::new(1, 2),
    ));
    session
}

#[test]
fn test_arrows_map_to_directions() {
    assert_eq!(
        InputRouter::<MazeField>::direction(&press(KeyCode::Up)),
        Some(Direction::Up)
    );
    assert_eq!(
        InputRouter::<MazeField>::direction(&press(KeyCode::Right)),
        Some(Direction::Right)
    );
    assert_eq!(
        InputRouter::<MazeField>::direction(&press(KeyCode::Char('w'))),
        None
    );
}

#[test]
fn test_other_keys_pass_through() {
    let session = corridor();
    let router = InputRouter::new(session.subscribe());
    let key = press(KeyCode::Char('s'));
    assert_eq!(router.route(key), KeyRoute::PassThrough(key));
}

#[test]
fn test_plans_against_latest_snapshot() {
    let mut session = corridor();
    let router = InputRouter::new(session.subscribe());

    assert_eq!(
        router.route(press(KeyCode::Right)),
        KeyRoute::Move(MovePlan::Accept(Position::new(0, 1)))
    );
    assert_eq!(router.route(press(KeyCode::Down)), KeyRoute::Move(MovePlan::Blocked));

    // The router was created once; it must see the moves that followed.
    session.step(Direction::Right, Instant::now());
    session.step(Direction::Right, Instant::now());
    assert_eq!(
        router.route(press(KeyCode::Down)),
        KeyRoute::Move(MovePlan::Accept(Position::new(1, 2)))
    );
    assert_eq!(
        router.route(press(KeyCode::Right)),
        KeyRoute::Move(MovePlan::OutOfBounds)
    );
}

#[test]
fn test_routed_plan_drives_session() {
    let mut session = corridor();
    let router = InputRouter::new(session.subscribe());
    for code in [KeyCode::Right, KeyCode::Right, KeyCode::Down] {
        if let KeyRoute::Move(plan) = router.route(press(code)) {
            session.apply_move(plan, Instant::now());
        }
    }
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(router.route(press(KeyCode::Left)), KeyRoute::Consumed);
}

#[test]
fn test_arrows_consumed_while_computing() {
    let mut session = corridor();
    let router = InputRouter::new(session.subscribe());
    session.begin_solve().expect("idle session can solve");
    assert_eq!(router.route(press(KeyCode::Right)), KeyRoute::Consumed);
    assert_eq!(router.route(press(KeyCode::Up)), KeyRoute::Consumed);
}

#[test]
fn test_arrows_consumed_before_level_loads() {
    let session: SessionController<MazeField> =
        SessionController::new(Arc::new(SignalLog::default()));
    let router = InputRouter::new(session.subscribe());
    assert_eq!(router.route(press(KeyCode::Left)), KeyRoute::Consumed);
}

#[test]
fn test_puzzle_arrows_move_the_gap() {
    let mut session: SessionController<PuzzleField> =
        SessionController::new(Arc::new(SignalLog::default()));
    let board = Board::new([1, 2, 3, 4, 0, 6, 7, 5, 8]).expect("valid board");
    session.load(PuzzleLevel::new(2, "Two away", board));
    let router = InputRouter::new(session.subscribe());

    assert_eq!(router.route(press(KeyCode::Down)), KeyRoute::Move(MovePlan::Accept(7)));
    assert_eq!(router.route(press(KeyCode::Up)), KeyRoute::Move(MovePlan::Accept(1)));
}
