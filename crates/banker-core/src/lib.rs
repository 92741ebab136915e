//! Game mutation engine and single-writer service for the Banker game.
//!
//! The core consumes a [`CommandIntent`] (who is acting and which typed
//! command they invoked) and produces either an [`Outcome`] or a named
//! [`Rejection`]. Accepted commands are journaled, audited for asset
//! conservation, and persisted through a [`banker_db::SnapshotStore`].
//!
//! # Architecture
//!
//! ```text
//! GameHandle --mpsc--> GameService (one task)
//!                         |-- SnapshotStore::load
//!                         |-- dispatch --> GameEngine (pure, per snapshot)
//!                         |-- Ledger + conservation audit
//!                         +-- SnapshotStore::save
//! ```
//!
//! # Modules
//!
//! - [`command`] -- Command intents and outcomes
//! - [`config`] -- YAML configuration with env overrides
//! - [`dispatch`] -- Routes intents to engine operations
//! - [`engine`] -- Mutation rules per command
//! - [`error`] -- Business-rule rejections
//! - [`report`] -- Vote tallies
//! - [`service`] -- The single-writer game service

pub mod command;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod report;
pub mod service;

// Re-export primary types for convenience.
pub use command::{Command, CommandIntent, Outcome, PlayerSummary};
pub use config::{BankerConfig, ConfigError};
pub use dispatch::dispatch;
pub use engine::{Applied, GameEngine, Movement, Policy};
pub use error::Rejection;
pub use report::{VoteReport, VoteTally};
pub use service::{CommandError, GameHandle, GameService, ServiceError};
