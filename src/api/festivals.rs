//! Festival API endpoints.

use axum::extract::{rejection::QueryRejection, Path, Query, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{FestivalQuery, StoredFestival};
use crate::AppState;

/// GET /api/festivals - List synced festivals.
pub async fn list_festivals(
    State(state): State<AppState>,
    query: Result<Query<FestivalQuery>, QueryRejection>,
) -> ApiResult<Vec<StoredFestival>> {
    let Query(query) = query?;
    let festivals = state.repo.list_festivals(&query).await?;
    success(festivals)
}

/// GET /api/festivals/{name} - Get one festival by name.
pub async fn get_festival(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StoredFestival> {
    match state.repo.get_festival(&name).await? {
        Some(festival) => success(festival),
        None => Err(AppError::NotFound(format!("Festival {} not found", name))),
    }
}
