//! Database repository for festival and sync log operations.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    timestamp, FestivalQuery, FestivalRecord, NewSyncLog, StoredFestival, SyncLogEntry,
    SyncStatus,
};

/// Default number of sync log entries returned.
pub const DEFAULT_LOG_LIMIT: i64 = 20;

/// Maximum number of sync log entries returned.
pub const MAX_LOG_LIMIT: i64 = 100;

const FESTIVAL_COLUMNS: &str = "id, name, type, month, deadline, price, steam_feature, worth_it, description, official_url, steam_url, last_synced";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== FESTIVAL OPERATIONS ====================

    /// Insert or update festivals by name in a single transaction.
    ///
    /// Matching rows are fully overwritten, including `last_synced`. Rows not
    /// present in `festivals` are left alone.
    pub async fn upsert_festivals(&self, festivals: &[FestivalRecord]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for festival in festivals {
            sqlx::query(
                r#"INSERT INTO festivals (
                    name, type, month, deadline, price, steam_feature,
                    worth_it, description, official_url, steam_url, last_synced
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(name) DO UPDATE SET
                    type = excluded.type,
                    month = excluded.month,
                    deadline = excluded.deadline,
                    price = excluded.price,
                    steam_feature = excluded.steam_feature,
                    worth_it = excluded.worth_it,
                    description = excluded.description,
                    official_url = excluded.official_url,
                    steam_url = excluded.steam_url,
                    last_synced = excluded.last_synced"#,
            )
            .bind(&festival.name)
            .bind(&festival.kind)
            .bind(&festival.month)
            .bind(&festival.deadline)
            .bind(&festival.price)
            .bind(festival.steam_feature as i32)
            .bind(&festival.worth_it)
            .bind(&festival.description)
            .bind(&festival.official_url)
            .bind(&festival.steam_url)
            .bind(&festival.last_synced)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Get a festival by its name.
    pub async fn get_festival(&self, name: &str) -> Result<Option<StoredFestival>, AppError> {
        let sql = format!("SELECT {} FROM festivals WHERE name = ?", FESTIVAL_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(festival_from_row))
    }

    /// List festivals matching the query filters.
    ///
    /// Category, price and Steam filters and the sort run in SQL. The open and
    /// text filters run here: SQLite's `lower()` only folds ASCII, and "open"
    /// needs a real calendar date.
    pub async fn list_festivals(
        &self,
        query: &FestivalQuery,
    ) -> Result<Vec<StoredFestival>, AppError> {
        let sql = format!(
            r#"SELECT {} FROM festivals
               WHERE (? IS NULL OR type = ?)
                 AND (? = 0 OR price = 'Free')
                 AND (? = 0 OR steam_feature = 1)
               ORDER BY {}"#,
            FESTIVAL_COLUMNS,
            query.sort.order_by()
        );

        let rows = sqlx::query(&sql)
            .bind(&query.kind)
            .bind(&query.kind)
            .bind(query.free as i32)
            .bind(query.steam as i32)
            .fetch_all(&self.pool)
            .await?;

        let today = Utc::now().date_naive();
        let needle = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        Ok(rows
            .iter()
            .map(festival_from_row)
            .filter(|f| !query.open || is_open(&f.record, today))
            .filter(|f| needle.as_deref().map_or(true, |n| matches_text(&f.record, n)))
            .collect())
    }

    // ==================== SYNC LOG OPERATIONS ====================

    /// Append one sync log entry.
    pub async fn insert_sync_log(&self, entry: &NewSyncLog) -> Result<SyncLogEntry, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = timestamp(Utc::now());

        sqlx::query(
            "INSERT INTO sync_log (id, rows_synced, status, error, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(entry.rows_synced)
        .bind(entry.status.as_str())
        .bind(&entry.error)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(SyncLogEntry {
            id,
            rows_synced: entry.rows_synced,
            status: entry.status,
            error: entry.error.clone(),
            created_at: now,
        })
    }

    /// List sync log entries, newest first.
    pub async fn list_sync_log(&self, limit: i64) -> Result<Vec<SyncLogEntry>, AppError> {
        let rows = sqlx::query(
            "SELECT id, rows_synced, status, error, created_at FROM sync_log ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(limit.clamp(1, MAX_LOG_LIMIT))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(sync_log_from_row).collect())
    }
}

// ==================== ROW MAPPING ====================

fn festival_from_row(row: &sqlx::sqlite::SqliteRow) -> StoredFestival {
    let steam_feature: i32 = row.get("steam_feature");
    StoredFestival {
        id: row.get("id"),
        record: FestivalRecord {
            name: row.get("name"),
            kind: row.get("type"),
            month: row.get("month"),
            deadline: row.get("deadline"),
            price: row.get("price"),
            steam_feature: steam_feature != 0,
            worth_it: row.get("worth_it"),
            description: row.get("description"),
            official_url: row.get("official_url"),
            steam_url: row.get("steam_url"),
            last_synced: row.get("last_synced"),
        },
    }
}

fn sync_log_from_row(row: &sqlx::sqlite::SqliteRow) -> SyncLogEntry {
    let status: String = row.get("status");
    SyncLogEntry {
        id: row.get("id"),
        rows_synced: row.get("rows_synced"),
        status: SyncStatus::from_str(&status).unwrap_or(SyncStatus::Error),
        error: row.get("error"),
        created_at: row.get("created_at"),
    }
}

/// Whether a festival still takes submissions on `today`.
///
/// Undated festivals are open. A deadline that fits `YYYY-MM-DD` but is not a
/// calendar date (`2024-13-40`) is treated as closed.
fn is_open(festival: &FestivalRecord, today: NaiveDate) -> bool {
    match festival.deadline.as_deref() {
        None => true,
        Some(deadline) => NaiveDate::parse_from_str(deadline, "%Y-%m-%d")
            .is_ok_and(|date| date >= today),
    }
}

/// Case-insensitive substring match on name or description. `needle` is already lowercased.
fn matches_text(festival: &FestivalRecord, needle: &str) -> bool {
    festival.name.to_lowercase().contains(needle)
        || festival
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}
