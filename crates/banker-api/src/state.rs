//! Shared state handed to every handler.

use banker_core::GameHandle;

/// State shared across all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the running game service.
    pub handle: GameHandle,
}

impl AppState {
    /// Wrap a service handle.
    pub const fn new(handle: GameHandle) -> Self {
        Self { handle }
    }
}
