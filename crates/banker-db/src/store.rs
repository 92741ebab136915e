//! The storage seam between the game service and the snapshot medium.

use std::future::Future;

use banker_types::Game;

use crate::error::DbError;

/// Durable home of the single game snapshot.
///
/// Implementations must make a successful [`save`](Self::save) visible
/// to the next [`load`](Self::load) and must reject a save whose
/// `revision` does not directly follow the persisted one.
pub trait SnapshotStore: Send + Sync + 'static {
    /// Load the persisted game.
    ///
    /// Returns `Ok(None)` only when no snapshot has ever been written.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] when a snapshot exists but cannot be read or
    /// decoded.
    fn load(&self) -> impl Future<Output = Result<Option<Game>, DbError>> + Send;

    /// Persist `game`, replacing revision `game.revision - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Conflict`] on a revision mismatch, or another
    /// [`DbError`] when the write itself fails.
    fn save(&self, game: &Game) -> impl Future<Output = Result<(), DbError>> + Send;
}
