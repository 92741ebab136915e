//! Axum router construction for the Banker API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness
/// - `POST /api/commands` -- execute a command intent
/// - `GET /api/game` -- current snapshot
/// - `GET /api/players` -- living players, optionally filtered by name
/// - `GET /api/rounds/latest/report` -- tally of the latest round
/// - `GET /api/rounds/{n}/report` -- tally of round `n`
/// - `GET /api/ledger` -- asset journal
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/commands", post(handlers::execute_command))
        .route("/api/game", get(handlers::get_game))
        .route("/api/players", get(handlers::list_players))
        .route(
            "/api/rounds/latest/report",
            get(handlers::latest_round_report),
        )
        .route("/api/rounds/{n}/report", get(handlers::round_report))
        .route("/api/ledger", get(handlers::get_ledger))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
