//! Snapshot persistence for the Banker game.
//!
//! The complete game state is one JSON document. Every committed command
//! rewrites it, tagged with a monotonically increasing `revision` so two
//! writers cannot silently overwrite each other.
//!
//! # Modules
//!
//! - [`snapshot`] -- JSON codec and revision rules
//! - [`store`] -- the [`SnapshotStore`] trait
//! - [`file_store`] -- [`JsonFileStore`], the on-disk implementation
//! - [`memory_store`] -- [`MemoryStore`], for tests
//! - [`error`] -- Shared error types

pub mod error;
pub mod file_store;
pub mod memory_store;
pub mod snapshot;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use store::SnapshotStore;
