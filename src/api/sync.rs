//! Sync trigger endpoint.

use axum::{extract::State, Json};

use crate::errors::SyncError;
use crate::sync::{run_sync, SyncSummary};
use crate::AppState;

/// POST /sync - Run one festival sync.
///
/// Responds `{ synced, at }` on success and `{ error, details }` otherwise.
pub async fn trigger_sync(State(state): State<AppState>) -> Result<Json<SyncSummary>, SyncError> {
    let summary = run_sync(&state.source, &state.repo).await?;
    Ok(Json(summary))
}
