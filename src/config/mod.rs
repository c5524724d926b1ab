//! Configuration module for the festival sync service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Public CSV export of the festival spreadsheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1NGseGNHv6Tth5e_yuRWzeVczQkzqXXGF4k16IsvyiTE/export?format=csv&gid=0";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL the festival sheet is fetched from on every run
    pub sheet_url: String,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log line format (pretty or json)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let sheet_url =
            env::var("FESTIVAL_SHEET_URL").unwrap_or_else(|_| DEFAULT_SHEET_URL.to_string());

        let db_path = env::var("FESTIVAL_DB_PATH")
            .unwrap_or_else(|_| "./data/festivals.sqlite".to_string())
            .into();

        let raw_addr =
            env::var("FESTIVAL_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = raw_addr.parse().map_err(|_| {
            AppError::Config(format!("Invalid FESTIVAL_BIND_ADDR format: {}", raw_addr))
        })?;

        let log_level = env::var("FESTIVAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("FESTIVAL_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            sheet_url,
            db_path,
            bind_addr,
            log_level,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "FESTIVAL_SHEET_URL",
        "FESTIVAL_DB_PATH",
        "FESTIVAL_BIND_ADDR",
        "FESTIVAL_LOG_LEVEL",
        "FESTIVAL_LOG_FORMAT",
    ];

    // Both cases share one test so they never race on the process environment.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.sheet_url, DEFAULT_SHEET_URL);
        assert_eq!(config.db_path, PathBuf::from("./data/festivals.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);

        env::set_var("FESTIVAL_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.message().contains("not-an-address"));

        env::set_var("FESTIVAL_BIND_ADDR", "0.0.0.0:9000");
        env::set_var("FESTIVAL_LOG_FORMAT", "JSON");
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_format, LogFormat::Json);

        for var in VARS {
            env::remove_var(var);
        }
    }
}
