//! JSON file snapshot store.
//!
//! The whole game lives in one pretty-printed JSON document. Saves go to
//! a sibling temp file first and are renamed over the target, so a crash
//! mid-write never leaves a truncated snapshot behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use banker_types::Game;

use crate::error::DbError;
use crate::snapshot::{check_revision, decode, encode};
use crate::store::SnapshotStore;

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the snapshot at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> DbError {
        DbError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn read_existing(&self) -> Result<Option<Game>, DbError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => decode(&contents, &self.path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Game>, DbError> {
        let game = self.read_existing().await?;
        match &game {
            Some(g) => tracing::info!(
                path = %self.path.display(),
                revision = g.revision,
                players = g.players.len(),
                factions = g.factions.len(),
                rounds = g.rounds.len(),
                "Loaded game snapshot"
            ),
            None => tracing::info!(path = %self.path.display(), "No game snapshot on disk"),
        }
        Ok(game)
    }

    async fn save(&self, game: &Game) -> Result<(), DbError> {
        let found = self.read_existing().await?.map(|g| g.revision);
        check_revision(game.revision, found)?;

        let contents = encode(game)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, contents.as_bytes())
            .await
            .map_err(|e| DbError::Io {
                path: temp.clone(),
                source: e,
            })?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            revision = game.revision,
            bytes = contents.len(),
            "Saved game snapshot"
        );
        Ok(())
    }
}
