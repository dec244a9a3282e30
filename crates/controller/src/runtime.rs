//! Tokio runtime driver
//!
//! One task owns the [`Session`]. It waits on three sources at once: input
//! commands from [`SessionHandle`]s, the countdown clock and the next timer
//! deadline. After every step the latest state is published on a watch
//! channel as an `Arc<GameState>`, so readers never block the game loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::RandomSource;
use crate::engine::{Action, GameState, Platform};
use crate::error::ControllerError;
use crate::session::Session;
use crate::types::InputEvent;

const COMMAND_BUFFER: usize = 64;

#[derive(Debug)]
pub enum Command {
    Input(InputEvent),
    /// Presentation-originated actions (particle cleanup and the like)
    Action(Action),
    Shutdown,
}

/// Cloneable handle to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<Arc<GameState>>,
}

impl SessionHandle {
    pub async fn send(&self, event: InputEvent) -> Result<(), ControllerError> {
        self.command(Command::Input(event)).await
    }

    pub async fn dispatch(&self, action: Action) -> Result<(), ControllerError> {
        self.command(Command::Action(action)).await
    }

    pub async fn shutdown(&self) -> Result<(), ControllerError> {
        self.command(Command::Shutdown).await
    }

    async fn command(&self, command: Command) -> Result<(), ControllerError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ControllerError::SessionClosed)
    }

    /// Latest published state
    pub fn snapshot(&self) -> Arc<GameState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<GameState>> {
        self.state.clone()
    }

    /// Wait until a published state satisfies `predicate`
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&GameState) -> bool,
    ) -> Result<Arc<GameState>, ControllerError> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(|state| predicate(state.as_ref()))
            .await
            .map_err(|_| ControllerError::SessionClosed)?;
        Ok(Arc::clone(&state))
    }
}

/// Spawn `session` onto the current tokio runtime.
///
/// The task ends on [`Command::Shutdown`] or when every handle is dropped,
/// and hands the session back. It fails straight away when the session's
/// timing cannot drive a clock.
pub fn spawn_session<R, P>(
    session: Session<R, P>,
) -> (SessionHandle, JoinHandle<anyhow::Result<Session<R, P>>>)
where
    R: RandomSource + Send + 'static,
    P: Platform + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (state_tx, state_rx) = watch::channel(Arc::new(session.state().clone()));
    let task = tokio::spawn(run_session(session, command_rx, state_tx));
    (
        SessionHandle {
            commands: command_tx,
            state: state_rx,
        },
        task,
    )
}

async fn run_session<R, P>(
    mut session: Session<R, P>,
    mut commands: mpsc::Receiver<Command>,
    state_tx: watch::Sender<Arc<GameState>>,
) -> anyhow::Result<Session<R, P>>
where
    R: RandomSource,
    P: Platform,
{
    session
        .timing()
        .validate()
        .context("session timing rejected")?;
    let period = Duration::from_millis(session.timing().tick_ms);
    // Virtual time continues from wherever the session left off
    let now = Instant::now();
    let origin = now
        .checked_sub(Duration::from_millis(session.now_ms()))
        .unwrap_or(now);
    let mut ticker = time::interval_at(now + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut game = session.state().session();

    info!("session task started");
    loop {
        let deadline = session
            .next_deadline()
            .map(|due| origin + Duration::from_millis(due));

        tokio::select! {
            command = commands.recv() => {
                session.advance_to(elapsed_ms(origin));
                match command {
                    Some(Command::Input(event)) => {
                        session.handle_input(event);
                    }
                    Some(Command::Action(action)) => {
                        session.dispatch(action);
                        session.run_due();
                    }
                    Some(Command::Shutdown) | None => break,
                }
            }
            _ = ticker.tick() => {
                session.advance_to(elapsed_ms(origin));
                session.handle_input(InputEvent::Tick);
            }
            _ = sleep_until(deadline) => {
                session.advance_to(elapsed_ms(origin));
            }
        }

        // A new game gets a full first second on the clock
        if session.state().session() != game {
            game = session.state().session();
            ticker.reset();
        }
        publish(&state_tx, session.state());
    }

    publish(&state_tx, session.state());
    info!(now_ms = session.now_ms(), "session task stopped");
    Ok(session)
}

fn elapsed_ms(origin: Instant) -> u64 {
    u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn publish(state_tx: &watch::Sender<Arc<GameState>>, state: &GameState) {
    state_tx.send_if_modified(|current| {
        if current.as_ref() == state {
            return false;
        }
        debug!(session = state.session(), status = ?state.status(), "publish");
        *current = Arc::new(state.clone());
        true
    });
}
