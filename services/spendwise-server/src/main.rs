//! Spendwise Server
//!
//! HTTP server for the Spendwise personal finance tracker.
//!
//! # Features
//!
//! - JWT bearer authentication
//! - SQLite storage with embedded migrations
//! - OpenAPI documentation with Swagger UI
//! - Prometheus metrics export
//! - Graceful shutdown handling
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! JWT_SECRET=... spendwise-server
//!
//! # Start with custom config
//! spendwise-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! SPENDWISE__SERVER__PORT=9000 spendwise-server --dev-mode
//! ```

mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spendwise_api::{create_router, ApiConfig, AppState};
use spendwise_auth::config::MIN_SECRET_LENGTH;
use spendwise_auth::{AuthConfig, AuthService};
use spendwise_core::SystemClock;
use spendwise_db::{Database, DatabaseConfig};

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Spendwise Server - personal finance tracker API
#[derive(Parser, Debug)]
#[command(name = "spendwise-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "SPENDWISE_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "SPENDWISE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SPENDWISE_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SPENDWISE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "SPENDWISE_LOG_FORMAT")]
    log_format: Option<String>,

    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// JWT secret key
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Development mode: generates a throwaway JWT secret when none is set
    #[arg(long, env = "SPENDWISE_DEV_MODE")]
    dev_mode: bool,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut server_config = ServerConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        server_config.server.host = host;
    }
    if let Some(port) = args.port {
        server_config.server.port = port;
    }
    if let Some(url) = args.database_url {
        server_config.database.url = url;
    }
    if let Some(secret) = args.jwt_secret {
        server_config.auth.jwt.secret = secret;
    }
    if let Some(level) = args.log_level {
        server_config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        server_config.logging.format = format;
    }

    init_logging(&server_config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Spendwise server");

    validate_config(&mut server_config, args.dev_mode)?;

    let db = init_database(&server_config.database).await?;
    let auth = init_auth(server_config.auth.clone())?;

    let state = Arc::new(AppState::with_clock(db, auth, Arc::new(SystemClock)));

    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        cors_origins: server_config.api.cors_origins.clone(),
        enable_compression: server_config.api.enable_compression,
        enable_tracing: server_config.api.enable_tracing,
    };

    let app = create_router(state, api_config);

    if server_config.metrics.enabled {
        start_metrics_server(&server_config.metrics)?;
    }

    let addr = server_config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(server_config.server.shutdown_timeout()))
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()?,
        _ => subscriber
            .with(fmt::layer().pretty().with_target(true))
            .try_init()?,
    }

    Ok(())
}

/// Validate configuration, filling in a development secret when allowed
fn validate_config(config: &mut ServerConfig, dev_mode: bool) -> anyhow::Result<()> {
    if config.auth.jwt.secret.len() < MIN_SECRET_LENGTH {
        if !dev_mode {
            anyhow::bail!(
                "JWT secret must be at least {} bytes. Set JWT_SECRET or run with --dev-mode.",
                MIN_SECRET_LENGTH
            );
        }
        tracing::warn!("No JWT secret configured; tokens will not survive a restart");
        config.auth.jwt.secret = format!("{}{}", uuid::Uuid::new_v4(), uuid::Uuid::new_v4());
    }

    if config.database.is_in_memory() {
        tracing::warn!("In-memory database configured; data is lost on shutdown");
        // Every pooled in-memory connection would be a separate database
        config.database.max_connections = 1;
        config.database.min_connections = 1;
    }

    if config.database.min_connections > config.database.max_connections {
        anyhow::bail!("database.min_connections exceeds database.max_connections");
    }

    Ok(())
}

/// Initialize database connection
async fn init_database(config: &DatabaseConfig) -> anyhow::Result<Arc<Database>> {
    tracing::info!("Connecting to database...");

    let db = Database::connect(config).await?;
    db.migrate().await?;

    let health = db.health_check().await?;
    if !health.healthy {
        anyhow::bail!("Database health check failed");
    }

    tracing::info!(database = health.database, "Database health check passed");

    Ok(Arc::new(db))
}

/// Initialize authentication service
fn init_auth(config: AuthConfig) -> anyhow::Result<Arc<AuthService>> {
    tracing::info!(
        issuer = %config.jwt.issuer,
        token_lifetime_secs = config.jwt.access_token_lifetime.as_secs(),
        "Initializing authentication service"
    );

    Ok(Arc::new(AuthService::new(config)?))
}

/// Start Prometheus metrics listener
fn start_metrics_server(config: &config::MetricsConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    metrics::describe_counter!(
        "spendwise_http_requests_total",
        "HTTP requests by method and status"
    );
    metrics::describe_counter!(
        "spendwise_transactions_created_total",
        "Transactions recorded, by kind"
    );

    tracing::info!(port = config.port, "Metrics server started");

    Ok(())
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "Draining in-flight requests"
    );
}

// =============================================================================
// Tests
// =============================================================================
