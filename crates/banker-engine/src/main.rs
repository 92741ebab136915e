//! Banker game service binary.
//!
//! Wires together configuration, structured logging, the JSON snapshot
//! store, the single-writer game service, and the HTTP command boundary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `banker-config.yaml` (or `BANKER_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the snapshot store and check the existing snapshot loads
//! 4. Spawn the game service task
//! 5. Serve the HTTP API until `Ctrl-C`
//! 6. Drain the game service

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use banker_api::AppState;
use banker_core::config::LoggingConfig;
use banker_core::engine::Policy;
use banker_core::{BankerConfig, GameEngine, GameService};
use banker_db::JsonFileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "banker-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the initial snapshot load, or the
/// HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = std::env::var("BANKER_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("banker-engine starting");
    if !found {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        snapshot_path = %config.game.snapshot_path.display(),
        default_withdraw_limit = config.game.default_withdraw_limit,
        enforce_withdraw_limit = config.game.enforce_withdraw_limit,
        operators = config.game.operators.len(),
        queue_capacity = config.service.queue_capacity,
        "Configuration loaded"
    );

    // 3. Open the snapshot store.
    let store = JsonFileStore::new(config.game.snapshot_path.clone());
    let service = GameService::new(store, GameEngine::new(Policy::from(&config.game)))
        .with_operators(config.game.operators.iter().copied());
    if config.game.operators.is_empty() {
        tracing::warn!("No operators configured, moderator commands will be rejected");
    }
    let game = service.snapshot().await?;
    info!(
        revision = game.revision,
        is_active = game.is_active,
        factions = game.factions.len(),
        players = game.players.len(),
        rounds = game.rounds.len(),
        "Snapshot loaded"
    );

    // 4. Spawn the game service.
    let (handle, task) = service.spawn(config.service.queue_capacity);

    // 5. Serve until shutdown.
    let state = Arc::new(AppState::new(handle));
    banker_api::start_server(&config.server, state).await?;

    // 6. The router held the last handle; the service drains and stops.
    task.await.map_err(|e| EngineError::Service {
        message: e.to_string(),
    })?;
    info!("banker-engine stopped");
    Ok(())
}

/// Load configuration from `path`, falling back to defaults (plus env
/// overrides) when the file does not exist.
///
/// Returns the config and whether the file was found.
fn load_config(path: &std::path::Path) -> Result<(BankerConfig, bool), EngineError> {
    if path.exists() {
        Ok((BankerConfig::from_file(path)?, true))
    } else {
        let mut config = BankerConfig::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok((config, false))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
