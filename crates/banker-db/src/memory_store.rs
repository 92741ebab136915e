//! In-memory snapshot store for tests and ephemeral runs.
//!
//! Holds the encoded JSON rather than the [`Game`] value so every load
//! exercises the same codec as the file store.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use banker_types::Game;

use crate::error::DbError;
use crate::snapshot::{check_revision, decode, encode};
use crate::store::SnapshotStore;

const ORIGIN: &str = "<memory>";

/// Snapshot store that keeps the document in memory.
///
/// Clones share the same document.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    /// Create an empty store: the first load returns `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with raw snapshot text.
    pub fn with_document(contents: impl Into<String>) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// The raw document as last saved, if any.
    pub async fn document(&self) -> Option<String> {
        self.document.lock().await.clone()
    }
}

impl SnapshotStore for MemoryStore {
    async fn load(&self) -> Result<Option<Game>, DbError> {
        let guard = self.document.lock().await;
        guard
            .as_deref()
            .map(|text| decode(text, Path::new(ORIGIN)))
            .transpose()
    }

    async fn save(&self, game: &Game) -> Result<(), DbError> {
        let mut guard = self.document.lock().await;
        let found = guard
            .as_deref()
            .map(|text| decode(text, Path::new(ORIGIN)))
            .transpose()?
            .map(|g| g.revision);
        check_revision(game.revision, found)?;
        *guard = Some(encode(game)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_loads_none() {
        let store = MemoryStore::new();
        assert!(matches!(store.load().await, Ok(None)));
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryStore::new();
        let game = Game {
            is_active: true,
            revision: 1,
            ..Game::default()
        };
        assert!(store.save(&game).await.is_ok());
        let loaded = store.load().await;
        assert!(matches!(loaded, Ok(Some(ref g)) if g.is_active && g.revision == 1));
    }

    #[tokio::test]
    async fn stale_save_conflicts() {
        let store = MemoryStore::new();
        let first = Game {
            revision: 1,
            ..Game::default()
        };
        assert!(store.save(&first).await.is_ok());
        assert!(matches!(
            store.save(&first).await,
            Err(DbError::Conflict {
                expected: Some(0),
                found: Some(1)
            })
        ));
    }

    #[tokio::test]
    async fn seeded_garbage_fails_to_load() {
        let store = MemoryStore::with_document("not json");
        assert!(store.load().await.is_err());
    }
}
