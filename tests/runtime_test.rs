//! Tokio driver tests on a paused clock

use std::time::Duration;

use tokio_test::{assert_err, assert_ok};
use tracing_subscriber::EnvFilter;

use tile_tally::controller::{spawn_session, ControllerError, Session, TimingConfig};
use tile_tally::engine::Action;
use tile_tally::types::{GameConfig, GameStatus, InputEvent};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test(start_paused = true)]
async fn runtime_plays_a_turn() {
    init_tracing();
    let (handle, task) = spawn_session(Session::with_seed(31, TimingConfig::default()));
    assert_ok!(handle.send(InputEvent::StartGame(GameConfig::default())).await);

    let state = tokio::time::timeout(Duration::from_secs(2), handle.wait_for(|s| s.target() > 0))
        .await
        .expect("first target was not published")
        .unwrap();
    let session_id = state.session();

    // Score a match directly; the controller takes it through clear and drop
    assert_ok!(
        handle
            .dispatch(Action::MatchSuccess {
                points: 12,
                coords: state.board().number_coords().into_iter().take(2).collect(),
            })
            .await
    );
    let state = tokio::time::timeout(
        Duration::from_secs(3),
        handle.wait_for(|s| s.score() == 12 && s.status() == GameStatus::Playing),
    )
    .await
    .expect("turn did not complete")
    .unwrap();
    assert_eq!(state.session(), session_id);
    assert!(state.board().is_full());
    assert!(state.target() > 0);

    assert_ok!(handle.shutdown().await);
    let session = task.await.unwrap().unwrap();
    assert_eq!(session.state().score(), 12);
}

#[tokio::test(start_paused = true)]
async fn runtime_pause_stops_the_clock() {
    init_tracing();
    let (handle, _task) = spawn_session(Session::with_seed(4, TimingConfig::default()));
    assert_ok!(handle.send(InputEvent::StartGame(GameConfig::default())).await);
    handle.wait_for(|s| s.target() > 0).await.unwrap();

    assert_ok!(handle.send(InputEvent::Pause).await);
    let paused = handle
        .wait_for(|s| s.status() == GameStatus::Paused)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(handle.snapshot().time_left(), paused.time_left());

    assert_ok!(handle.send(InputEvent::Resume).await);
    let resumed = tokio::time::timeout(
        Duration::from_secs(3),
        handle.wait_for(|s| s.time_left() < paused.time_left()),
    )
    .await
    .expect("clock did not resume")
    .unwrap();
    assert_eq!(resumed.status(), GameStatus::Playing);
}

#[tokio::test(start_paused = true)]
async fn runtime_countdown_ends_in_game_over() {
    let timing = TimingConfig::parse_overrides([("TILE_TALLY_TICK_MS", "100")]).unwrap();
    let (handle, _task) = spawn_session(Session::with_seed(6, timing));
    assert_ok!(handle.send(InputEvent::StartGame(GameConfig::default())).await);

    // 90 seconds at a 100 ms tick
    let state = tokio::time::timeout(
        Duration::from_secs(20),
        handle.wait_for(|s| s.status() == GameStatus::GameOver),
    )
    .await
    .expect("game did not end")
    .unwrap();
    assert_eq!(state.time_left(), 0);
}

#[tokio::test]
async fn runtime_stops_when_handles_drop() {
    let (handle, task) = spawn_session(Session::with_seed(1, TimingConfig::default()));
    let watcher = handle.subscribe();
    drop(handle);

    let session = tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("task did not stop")
        .unwrap()
        .unwrap();
    assert_eq!(session.state().status(), GameStatus::Ready);
    assert_eq!(watcher.borrow().status(), GameStatus::Ready);
}

#[tokio::test]
async fn handle_reports_closed_session() {
    let (handle, task) = spawn_session(Session::with_seed(1, TimingConfig::default()));
    assert_ok!(handle.shutdown().await);
    task.await.unwrap().unwrap();

    let err = assert_err!(handle.send(InputEvent::Restart).await);
    assert!(matches!(err, ControllerError::SessionClosed));
}
