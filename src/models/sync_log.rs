//! Audit log model for sync runs.

use serde::{Deserialize, Serialize};

/// Outcome of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Error,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "success",
            SyncStatus::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(SyncStatus::Success),
            "error" => Some(SyncStatus::Error),
            _ => None,
        }
    }
}

/// One row of the append-only sync log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncLogEntry {
    pub id: String,
    pub rows_synced: i64,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
}

/// Audit entry to append after a run's persistence step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSyncLog {
    pub rows_synced: i64,
    pub status: SyncStatus,
    pub error: Option<String>,
}

impl NewSyncLog {
    pub fn success(rows_synced: usize) -> Self {
        Self {
            rows_synced: rows_synced as i64,
            status: SyncStatus::Success,
            error: None,
        }
    }

    pub fn failure(rows_synced: usize, error: impl Into<String>) -> Self {
        Self {
            rows_synced: rows_synced as i64,
            status: SyncStatus::Error,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_column_text() {
        for status in [SyncStatus::Success, SyncStatus::Error] {
            assert_eq!(SyncStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(SyncStatus::from_str("pending"), None);
    }

    #[test]
    fn test_failure_keeps_count_and_message() {
        let entry = NewSyncLog::failure(12, "no such table: festivals");
        assert_eq!(entry.rows_synced, 12);
        assert_eq!(entry.status, SyncStatus::Error);
        assert_eq!(entry.error.as_deref(), Some("no such table: festivals"));
    }
}
