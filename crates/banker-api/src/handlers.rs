//! REST API handlers.
//!
//! Reads of vote tallies and the player list are routed through the game
//! service as read-only commands, so they see exactly what a chat command
//! would see and never persist anything.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use banker_core::{Command, CommandIntent, Outcome};
use banker_types::PlayerId;

use crate::error::ApiError;
use crate::state::AppState;

/// Actor id used for reads issued by the HTTP boundary itself.
const OBSERVER: PlayerId = PlayerId(0);

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// POST /api/commands
// ---------------------------------------------------------------------------

/// Execute one command intent.
///
/// Responds with the outcome and its human-readable message. A rejected
/// command responds `422` with the rejection code.
pub async fn execute_command(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<CommandIntent>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.handle.execute(intent).await?;
    let message = outcome.message();
    Ok(Json(serde_json::json!({
        "outcome": serde_json::to_value(&outcome)?,
        "message": message,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/game
// ---------------------------------------------------------------------------

/// The current persisted game snapshot.
pub async fn get_game(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let game = state.handle.snapshot().await?;
    Ok(Json(serde_json::to_value(&game)?))
}

// ---------------------------------------------------------------------------
// GET /api/players
// ---------------------------------------------------------------------------

/// Query parameters for the player list.
#[derive(Debug, Deserialize)]
pub struct PlayersQuery {
    /// Case-insensitive substring of the display name.
    pub filter: Option<String>,
}

/// Living players, optionally filtered by name, capped at 25.
pub async fn list_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = params.filter.filter(|f| !f.is_empty());
    let Outcome::Players { players } = read(&state, Command::ListPlayers { filter }).await? else {
        return Err(ApiError::UnexpectedOutcome("list-players"));
    };
    Ok(Json(serde_json::json!({
        "count": players.len(),
        "players": players,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/rounds/latest/report, GET /api/rounds/{n}/report
// ---------------------------------------------------------------------------

/// Vote tally for the latest round.
pub async fn latest_round_report(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    report(&state, None).await
}

/// Vote tally for round `n`.
pub async fn round_report(
    State(state): State<Arc<AppState>>,
    Path(n): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    report(&state, Some(n)).await
}

async fn report(state: &AppState, round: Option<u64>) -> Result<Json<serde_json::Value>, ApiError> {
    let Outcome::VoteReport(report) = read(state, Command::VoteReport { round }).await? else {
        return Err(ApiError::UnexpectedOutcome("vote-report"));
    };
    Ok(Json(serde_json::json!({
        "round_number": report.round_number,
        "is_active_round": report.is_active_round,
        "total_votes": report.total_votes(),
        "tallies": report.tallies,
        "message": report.to_string(),
    })))
}

// ---------------------------------------------------------------------------
// GET /api/ledger
// ---------------------------------------------------------------------------

/// Every journal entry committed since the service started.
pub async fn get_ledger(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.handle.ledger().await?;
    Ok(Json(serde_json::json!({
        "count": entries.len(),
        "entries": entries,
    })))
}

async fn read(state: &AppState, command: Command) -> Result<Outcome, ApiError> {
    Ok(state
        .handle
        .execute(CommandIntent::new(OBSERVER, command))
        .await?)
}
