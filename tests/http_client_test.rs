//! HTTP client and game screen tests against an in-process solver server.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use grid_masters::{GameScreen, HttpGameClient, LevelRepository, SolverClient};
use grid_masters_core::{
    Algorithm, Board, CellState, MazeField, MazeSolveRequest, Notice, Position, PuzzleField,
    PuzzleSolveRequest, SessionStatus, Signal, SignalLog, SolveOutcome,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::Instant;

async fn maze_levels() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "name": "Warmup",
            "layout": [[0, 0, 0], [1, 1, 0]],
            "start": [0, 0],
            "goal": [1, 2]
        },
        {
            "id": 2,
            "name": "Sealed",
            "layout": [[0, 1, 0]],
            "start": [0, 0],
            "goal": [0, 2]
        }
    ]))
}

async fn puzzle_levels() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "One away", "state": [1, 2, 3, 4, 5, 6, 7, 0, 8] }
    ]))
}

async fn solve_maze(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    let level = body["levelId"].as_u64().ok_or(StatusCode::BAD_REQUEST)?;
    let algorithm = body["algorithm"].as_str().ok_or(StatusCode::BAD_REQUEST)?;
    if !["BFS", "DFS", "A*"].contains(&algorithm) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let response = match level {
        1 => json!({
            "found": true,
            "path": [[0, 0], [0, 1], [0, 2], [1, 2]],
            "history": [[0, 0], [0, 1], [0, 2], [1, 2]],
            "steps": 4,
            "visited_count": 4
        }),
        _ => json!({ "found": false, "path": [], "history": [[0, 0]], "steps": 1, "visited_count": 1 }),
    };
    Ok(Json(response))
}

async fn solve_puzzle(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    if body["state"] != json!([1, 2, 3, 4, 5, 6, 7, 0, 8]) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    Ok(Json(json!({ "found": true, "path": [[1, 2, 3, 4, 5, 6, 7, 8, 0]] })))
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn solver_server() -> String {
    serve(
        Router::new()
            .route("/api/levels/maze", get(maze_levels))
            .route("/api/levels/puzzle", get(puzzle_levels))
            .route("/api/maze/solve", post(solve_maze))
            .route("/api/puzzle/solve", post(solve_puzzle)),
    )
    .await
}

#[tokio::test]
async fn test_fetches_levels() {
    let client = HttpGameClient::new(solver_server().await, None).unwrap();

    let mazes = client.maze_levels().await.unwrap();
    assert_eq!(mazes.len(), 2);
    assert_eq!(*mazes[0].goal(), Position::new(1, 2));

    let puzzles = client.puzzle_levels().await.unwrap();
    assert_eq!(puzzles[0].state().blank(), 7);
}

#[tokio::test]
async fn test_solve_maze_sends_camel_case_body() {
    let base = solver_server().await;
    let client = HttpGameClient::new(format!("{}/", base), None).unwrap();
    assert_eq!(client.base_url(), base);

    let solution = client
        .solve_maze(MazeSolveRequest {
            level_id: 1,
            algorithm: Algorithm::AStar,
        })
        .await
        .unwrap();
    assert!(solution.found);
    assert_eq!(solution.path.len(), 4);
    assert_eq!(solution.visited_count, 4);
}

#[tokio::test]
async fn test_solve_puzzle_round_trip() {
    let client = HttpGameClient::new(solver_server().await, None).unwrap();
    let solution = client
        .solve_puzzle(PuzzleSolveRequest {
            state: Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap(),
            algorithm: Algorithm::Bfs,
        })
        .await
        .unwrap();
    assert_eq!(solution.path, vec![Board::SOLVED]);
}

#[tokio::test]
async fn test_error_status_becomes_client_error() {
    let client = HttpGameClient::new(solver_server().await, None).unwrap();
    let err = client
        .solve_puzzle(PuzzleSolveRequest {
            state: Board::SOLVED,
            algorithm: Algorithm::Dfs,
        })
        .await
        .unwrap_err();
    assert!(err.message.contains("422"), "unexpected message: {}", err.message);
}

#[tokio::test]
async fn test_malformed_levels_are_rejected() {
    let base = serve(Router::new().route(
        "/api/levels/puzzle",
        get(|| async { Json(json!([{ "id": 1, "name": "Bad", "state": [1, 1, 2] }])) }),
    ))
    .await;
    let client = HttpGameClient::new(base, None).unwrap();
    let err = client.puzzle_levels().await.unwrap_err();
    assert!(err.message.starts_with("Malformed response"));
}

#[tokio::test]
async fn test_timeout_fails_stalled_request() {
    let base = serve(Router::new().route(
        "/api/levels/maze",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }),
    ))
    .await;
    let client = HttpGameClient::new(base, Some(Duration::from_millis(200))).unwrap();
    assert!(client.maze_levels().await.is_err());
}

#[tokio::test]
async fn test_game_screen_solves_and_replays() {
    let backend = Arc::new(HttpGameClient::new(solver_server().await, None).unwrap());
    let signals = Arc::new(SignalLog::default());
    let mut game: GameScreen<MazeField> =
        GameScreen::mount(backend, signals.clone(), Algorithm::Bfs);

    assert!(game.fetch_levels().await);
    assert_eq!(game.levels().len(), 2);
    assert!(game.solve());
    assert_eq!(game.session().status(), SessionStatus::Computing);

    let reply = game.next_reply().await.unwrap();
    let t0 = Instant::now();
    assert_eq!(game.on_reply(reply, t0), SolveOutcome::Animating { frames: 8 });

    let t_end = t0 + Duration::from_millis(30 * 8);
    assert!(game.poll(t0 + Duration::from_millis(30 * 4)));
    assert_eq!(game.session().frames_applied(), 4);
    assert_eq!(game.session().status(), SessionStatus::Animating);

    assert!(game.poll(t_end));
    assert_eq!(game.session().status(), SessionStatus::Idle);
    let snapshot = game.snapshot();
    let field = snapshot.field.expect("level loaded");
    assert_eq!(field.grid().count(CellState::Path), 4);
    assert_eq!(snapshot.solver_stats.map(|s| s.steps), Some(4));
    assert!(signals.take().is_empty());
}

#[tokio::test]
async fn test_game_screen_reports_no_solution() {
    let backend = Arc::new(HttpGameClient::new(solver_server().await, None).unwrap());
    let mut game: GameScreen<MazeField> =
        GameScreen::mount(backend, Arc::new(SignalLog::default()), Algorithm::Dfs);
    game.fetch_levels().await;
    assert!(game.next_level());
    assert_eq!(game.current(), 1);

    game.solve();
    let reply = game.next_reply().await.unwrap();
    assert_eq!(game.on_reply(reply, Instant::now()), SolveOutcome::NoSolution);
    assert_eq!(game.session().notice(), Some(&Notice::NoSolution));

    // Next wraps to the first level and clears the notice.
    assert!(game.next_level());
    assert_eq!(game.current(), 0);
    assert!(game.session().notice().is_none());
}

#[tokio::test]
async fn test_unreachable_server_shows_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let backend = Arc::new(HttpGameClient::new(base, None).unwrap());
    let mut game: GameScreen<PuzzleField> =
        GameScreen::mount(backend, Arc::new(SignalLog::default()), Algorithm::Bfs);
    assert!(!game.fetch_levels().await);
    assert!(game.load_error().is_some());

    assert!(game.set_levels(vec![grid_masters_core::PuzzleLevel::new(
        1,
        "One away",
        Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap(),
    )]));
    game.solve();
    let reply = game.next_reply().await.unwrap();
    assert_eq!(game.on_reply(reply, Instant::now()), SolveOutcome::Failed);
    assert!(matches!(
        game.session().notice(),
        Some(Notice::SolverUnavailable(_))
    ));
    assert_eq!(game.session().status(), SessionStatus::Idle);
}

#[tokio::test]
async fn test_puzzle_replay_emits_move_signal() {
    let backend = Arc::new(HttpGameClient::new(solver_server().await, None).unwrap());
    let signals = Arc::new(SignalLog::default());
    let mut game: GameScreen<PuzzleField> =
        GameScreen::mount(backend, signals.clone(), Algorithm::AStar);
    game.fetch_levels().await;
    game.solve();
    let reply = game.next_reply().await.unwrap();
    let t0 = Instant::now();
    game.on_reply(reply, t0);
    assert_eq!(game.session().status(), SessionStatus::Animating);

    assert!(game.poll(t0 + Duration::from_millis(300)));
    assert_eq!(game.session().status(), SessionStatus::Idle);
    assert!(game.snapshot().field.expect("level loaded").board().is_solved());
    assert_eq!(signals.take(), vec![Signal::Move]);
}
