//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Posting policy configuration.
    #[serde(default)]
    pub posting: PostingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Posting policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PostingConfig {
    /// Whether closing a fiscal period fails when draft journals remain in
    /// its date range. Defaults to `true`: the close-time balance snapshot
    /// would silently diverge from late-posted drafts otherwise.
    #[serde(default = "default_block_close_on_drafts")]
    pub block_close_on_drafts: bool,
}

fn default_block_close_on_drafts() -> bool {
    true
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            block_close_on_drafts: default_block_close_on_drafts(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
