//! Error types for the Banker binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the Banker binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: banker_core::ConfigError,
    },

    /// The snapshot could not be read at startup.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying store error.
        #[from]
        source: banker_core::ServiceError,
    },

    /// The HTTP server failed to start or stopped with an error.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: banker_api::ServerError,
    },

    /// The game service task panicked or was cancelled.
    #[error("game service task failed: {message}")]
    Service {
        /// Description of the task failure.
        message: String,
    },
}
