//! Server Configuration
//!
//! Layered configuration for the Spendwise server: optional file,
//! `config/default`, `config/local`, then `SPENDWISE__*` environment
//! variables (for example `SPENDWISE__SERVER__PORT=9000`).

use serde::{Deserialize, Serialize};
use spendwise_auth::AuthConfig;
use spendwise_db::DatabaseConfig;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Database configuration; unset keys fall back to `DATABASE_URL` & co.
    #[serde(default = "DatabaseConfig::from_env")]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server binding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Grace period for in-flight requests on shutdown, in seconds
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_secs: 10,
        }
    }
}

impl ServerSettings {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server.host {:?}: {}", self.host, e))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Get the shutdown timeout duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Enable CORS
    pub enable_cors: bool,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
    /// Enable response compression
    pub enable_compression: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            enable_compression: true,
            enable_tracing: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus listener
    pub enabled: bool,
    /// Metrics port (separate from main server)
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 9090,
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("SPENDWISE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Create a configuration for local development
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
            ..Default::default()
        }
    }
}
