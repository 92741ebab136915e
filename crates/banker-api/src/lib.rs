//! HTTP command boundary for the Banker game.
//!
//! Exposes the single-writer game service over a small JSON API. Every
//! mutation goes through one generic endpoint that accepts a command
//! intent; the remaining routes are read-only views of the snapshot, the
//! vote tallies, and the asset journal.
//!
//! # Modules
//!
//! - [`error`] -- API error type and HTTP response mapping
//! - [`handlers`] -- Route handlers
//! - [`router`] -- Axum router construction
//! - [`server`] -- Server lifecycle
//! - [`state`] -- Shared application state

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
