//! Festival Watch sync service
//!
//! Keeps a SQLite table of indie game festivals in step with a public spreadsheet
//! and serves it to the festival directory.

mod api;
mod cli;
mod config;
mod db;
mod errors;
mod ingest;
mod models;
mod sync;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use config::{Config, LogFormat};
use db::Repository;
use errors::{AppError, SyncFailure};
use sync::{run_sync, SheetSource};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub source: Arc<SheetSource>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    init_logging(&config);

    // Initialize database and sheet client
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));
    let source = Arc::new(SheetSource::new(http_client()?, config.sheet_url.clone()));

    let state = AppState {
        repo,
        source,
        config: Arc::new(config),
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(state).await?,
        Commands::Sync => sync_once(&state).await?,
    }

    Ok(())
}

/// Initialize logging. Log lines go to stderr so `sync` output stays clean.
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// HTTP client used to fetch the sheet.
fn http_client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(concat!("festival-sync/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}

async fn serve(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = state.config.bind_addr;

    tracing::info!("Starting festival sync service");
    tracing::info!("Database path: {:?}", state.config.db_path);
    tracing::info!("Sheet URL: {}", state.config.sheet_url);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run one sync, printing the summary to stdout or the failure body to stderr.
async fn sync_once(state: &AppState) -> Result<(), AppError> {
    match run_sync(&state.source, &state.repo).await {
        Ok(summary) => {
            println!("{}", serde_json::to_string(&summary)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&SyncFailure::from(&e))?);
            Err(e)
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Read API for the festival directory
    let api_routes = Router::new()
        .route("/festivals", get(api::list_festivals))
        .route("/festivals/{name}", get(api::get_festival))
        .route("/sync-log", get(api::list_sync_log));

    Router::new()
        .nest("/api", api_routes)
        .route("/sync", post(api::trigger_sync))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
