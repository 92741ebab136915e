//! The single-writer game service.
//!
//! One tokio task owns the snapshot store and the journal. Requests
//! arrive over a bounded channel and are handled strictly one at a time,
//! so two commands can never interleave their read-modify-write cycles.
//!
//! # Per-command cycle
//!
//! ```text
//! moderator command from a non-operator? reply NotOperator
//!     |
//! load snapshot (fresh inactive game if none exists)
//!     |
//!     +-- dispatch --> Rejection? reply, nothing persisted
//!     |
//!     +-- read-only or unchanged? reply, nothing persisted
//!     |
//!     +-- journal movements under revision + 1
//!     +-- conservation audit --> anomaly? refuse to persist
//!     +-- save snapshot (revision-checked)
//!     +-- reply
//! ```

use std::collections::BTreeSet;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use banker_db::{DbError, SnapshotStore};
use banker_ledger::{ConservationResult, Ledger, LedgerAnomaly, LedgerError};
use banker_types::{CommandId, Game, LedgerEntry, PlayerId};

use crate::command::{CommandIntent, Outcome};
use crate::dispatch::dispatch;
use crate::engine::GameEngine;
use crate::error::Rejection;

/// Infrastructure failures. Fatal for the command that hit them.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Loading or saving the snapshot failed.
    #[error("snapshot store error: {0}")]
    Store(#[from] DbError),

    /// A movement could not be journaled.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Holdings changed by something other than the recorded grants.
    #[error("conservation audit failed: {0}")]
    Integrity(LedgerAnomaly),

    /// The revision counter cannot advance any further.
    #[error("snapshot revision counter exhausted")]
    RevisionExhausted,

    /// The service task is no longer running.
    #[error("game service is not running")]
    Unavailable,
}

/// Why a command did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A business rule refused the command.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The command hit an infrastructure failure.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<DbError> for CommandError {
    fn from(err: DbError) -> Self {
        Self::Service(ServiceError::Store(err))
    }
}

/// Messages accepted by the service task.
#[derive(Debug)]
enum Request {
    Execute {
        intent: CommandIntent,
        reply: oneshot::Sender<Result<Outcome, CommandError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Result<Game, ServiceError>>,
    },
    Ledger {
        reply: oneshot::Sender<Vec<LedgerEntry>>,
    },
}

/// Wall-clock source for vote timestamps, in Unix seconds.
pub type Clock = fn() -> i64;

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Owns the store, the engine, and the journal.
#[derive(Debug)]
pub struct GameService<S> {
    store: S,
    engine: GameEngine,
    ledger: Ledger,
    clock: Clock,
    operators: BTreeSet<PlayerId>,
}

impl<S: SnapshotStore> GameService<S> {
    /// Create a service over `store`.
    pub fn new(store: S, engine: GameEngine) -> Self {
        Self {
            store,
            engine,
            ledger: Ledger::new(),
            clock: unix_now,
            operators: BTreeSet::new(),
        }
    }

    /// Allow `operators` to run moderator commands. Without any, every
    /// moderator command is rejected.
    #[must_use]
    pub fn with_operators(mut self, operators: impl IntoIterator<Item = PlayerId>) -> Self {
        self.operators.extend(operators);
        self
    }

    /// Replace the wall clock used for vote timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The journal of every movement committed by this process.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Move the service onto its own task and return a handle to it.
    ///
    /// The task stops once every [`GameHandle`] has been dropped.
    pub fn spawn(self, queue_capacity: usize) -> (GameHandle, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(queue_capacity.max(1));
        let task = tokio::spawn(self.run(receiver));
        (GameHandle { sender }, task)
    }

    async fn run(mut self, mut receiver: mpsc::Receiver<Request>) {
        tracing::info!("Game service started");
        while let Some(request) = receiver.recv().await {
            match request {
                Request::Execute { intent, reply } => {
                    let result = self.execute(&intent).await;
                    let _ = reply.send(result);
                }
                Request::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot().await);
                }
                Request::Ledger { reply } => {
                    let _ = reply.send(self.ledger.entries().to_vec());
                }
            }
        }
        tracing::info!(entries = self.ledger.len(), "Game service stopped");
    }

    /// The persisted game, or a fresh inactive game if none exists yet.
    pub async fn snapshot(&self) -> Result<Game, ServiceError> {
        match self.store.load().await? {
            Some(game) => Ok(game),
            None => Ok(Game::default()),
        }
    }

    /// Run one command through the full load, apply, audit, save cycle.
    pub async fn execute(&mut self, intent: &CommandIntent) -> Result<Outcome, CommandError> {
        let command_id = CommandId::new();
        tracing::info!(
            command_id = %command_id,
            actor = %intent.actor,
            command = intent.command.name(),
            "Received command"
        );

        if intent.command.requires_operator() && !self.operators.contains(&intent.actor) {
            let rejection = Rejection::NotOperator(intent.actor);
            log_rejection(command_id, &rejection);
            return Err(rejection.into());
        }

        let mut game = match self.store.load().await? {
            Some(game) => game,
            None => {
                tracing::info!("No snapshot found, starting a fresh inactive game");
                Game::default()
            }
        };

        if intent.command.is_read_only() {
            let applied = dispatch(&self.engine, &mut game, intent, (self.clock)())
                .inspect_err(|r| log_rejection(command_id, r))?;
            return Ok(applied.outcome);
        }

        let before = game.clone();
        let total_before = before.total_assets().ok_or(Rejection::ArithmeticOverflow)?;
        let applied = dispatch(&self.engine, &mut game, intent, (self.clock)())
            .inspect_err(|r| log_rejection(command_id, r))?;

        if game == before {
            tracing::debug!(command_id = %command_id, "Command left the game unchanged");
            return Ok(applied.outcome);
        }

        let revision = before
            .revision
            .checked_add(1)
            .ok_or(ServiceError::RevisionExhausted)?;
        game.revision = revision;

        let mut journal = Ledger::new();
        for movement in &applied.movements {
            journal
                .record(
                    revision,
                    movement.entry_type,
                    movement.from,
                    movement.to,
                    movement.amount,
                )
                .map_err(ServiceError::from)?;
        }

        let total_after = game.total_assets().ok_or(Rejection::ArithmeticOverflow)?;
        if let ConservationResult::Anomaly(anomaly) =
            journal.verify_holdings(revision, total_before, total_after)
        {
            tracing::error!(
                command_id = %command_id,
                revision,
                before = total_before,
                after = total_after,
                granted = anomaly.granted,
                "Conservation audit failed, snapshot not saved"
            );
            return Err(ServiceError::Integrity(anomaly).into());
        }

        self.store.save(&game).await?;
        self.ledger.extend(journal);

        tracing::info!(
            command_id = %command_id,
            revision,
            movements = applied.movements.len(),
            "Command committed"
        );
        Ok(applied.outcome)
    }
}

fn log_rejection(command_id: CommandId, rejection: &Rejection) {
    tracing::info!(
        command_id = %command_id,
        rejection = rejection.code(),
        reason = %rejection,
        "Command rejected"
    );
}

/// Cloneable handle to a running [`GameService`].
#[derive(Debug, Clone)]
pub struct GameHandle {
    sender: mpsc::Sender<Request>,
}

impl GameHandle {
    /// Execute a command and wait for its result.
    pub async fn execute(&self, intent: CommandIntent) -> Result<Outcome, CommandError> {
        let (reply, response) = oneshot::channel();
        self.request(Request::Execute { intent, reply }).await?;
        match response.await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Unavailable.into()),
        }
    }

    /// The current persisted game.
    pub async fn snapshot(&self) -> Result<Game, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.request(Request::Snapshot { reply }).await?;
        match response.await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Unavailable),
        }
    }

    /// Every journal entry committed so far.
    pub async fn ledger(&self) -> Result<Vec<LedgerEntry>, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.request(Request::Ledger { reply }).await?;
        match response.await {
            Ok(entries) => Ok(entries),
            Err(_) => Err(ServiceError::Unavailable),
        }
    }

    async fn request(&self, request: Request) -> Result<(), ServiceError> {
        if self.sender.send(request).await.is_err() {
            return Err(ServiceError::Unavailable);
        }
        Ok(())
    }
}
