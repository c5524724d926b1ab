//! Sync orchestration: fetch the festival sheet and merge it into the store.
//!
//! A run is fetch, parse, normalize, dedupe, upsert, then one audit entry.
//! Nothing is retried; the scheduler simply triggers the next run.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::Repository;
use crate::errors::AppError;
use crate::ingest::{self, ColumnMap};
use crate::models::{timestamp, NewSyncLog};

/// Where a run reads the festival sheet from.
#[derive(Debug, Clone)]
pub struct SheetSource {
    client: reqwest::Client,
    url: String,
    columns: ColumnMap,
}

impl SheetSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            columns: ColumnMap::default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// GET the sheet as text. Non-2xx responses are errors.
    pub async fn fetch(&self) -> Result<String, AppError> {
        let text = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Number of festivals upserted
    pub synced: usize,
    /// When the run finished
    pub at: String,
}

/// Run one sync.
///
/// A fetch failure aborts the run before anything is written, including the
/// audit entry. Once the sheet is in hand the audit entry is always attempted,
/// whether or not the upsert succeeded.
pub async fn run_sync(source: &SheetSource, repo: &Repository) -> Result<SyncSummary, AppError> {
    tracing::info!("Starting festival sync from {}", source.url());

    let raw = source.fetch().await?;
    let synced_at = timestamp(Utc::now());

    let records = ingest::parse_sheet(&raw, source.columns(), &synced_at);
    let parsed = records.len();
    let festivals = ingest::dedupe_by_name(records);
    let count = festivals.len();
    tracing::info!(
        "Parsed {} festival rows, {} after removing duplicate names",
        parsed,
        count
    );

    let outcome = repo.upsert_festivals(&festivals).await;

    let entry = match &outcome {
        Ok(()) => NewSyncLog::success(count),
        Err(e) => NewSyncLog::failure(count, e.message()),
    };
    if let Err(e) = repo.insert_sync_log(&entry).await {
        tracing::warn!("Failed to write sync log entry: {}", e);
    }

    match outcome {
        Ok(()) => {
            tracing::info!("Festival sync complete: {} festivals", count);
            Ok(SyncSummary {
                synced: count,
                at: timestamp(Utc::now()),
            })
        }
        Err(e) => {
            tracing::error!("Festival sync failed: {}", e);
            Err(e)
        }
    }
}
