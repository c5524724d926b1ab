//! Data models for the festival directory.
//!
//! JSON field names follow the directory UI's camelCase interface.

mod festival;
mod sync_log;

pub use festival::*;
pub use sync_log::*;

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp the way every stored and returned time is written.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
