//! Sync log API endpoints.

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::db::DEFAULT_LOG_LIMIT;
use crate::errors::AppError;
use crate::models::SyncLogEntry;
use crate::AppState;

/// Sync log query parameters.
#[derive(Debug, Deserialize)]
pub struct SyncLogQuery {
    /// Maximum number of entries (default: 20, max: 100).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LOG_LIMIT
}

/// GET /api/sync-log - Recent sync runs, newest first.
pub async fn list_sync_log(
    State(state): State<AppState>,
    params: Result<Query<SyncLogQuery>, QueryRejection>,
) -> ApiResult<Vec<SyncLogEntry>> {
    let Query(params) = params?;
    if params.limit < 1 {
        return Err(AppError::BadRequest("limit must be at least 1".to_string()));
    }

    let entries = state.repo.list_sync_log(params.limit).await?;
    success(entries)
}
