//! Database configuration

use serde::{Deserialize, Serialize};

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://spendwise.db`
    pub url: String,
    /// Maximum pool connections
    pub max_connections: u32,
    /// Minimum pool connections
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://spendwise.db".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(defaults.max_connections),
            min_connections: env_parse("DB_MIN_CONNECTIONS").unwrap_or(defaults.min_connections),
            acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT")
                .unwrap_or(defaults.acquire_timeout_secs),
        }
    }

    /// Whether the URL points at a private in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_file_backed() {
        let config = DatabaseConfig::default();
        assert!(!config.is_in_memory());
        assert!(config.max_connections >= config.min_connections);
    }

    #[test]
    fn test_in_memory_detection() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        assert!(config.is_in_memory());
    }
}
