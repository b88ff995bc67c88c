use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::pipeline::Mode;

/// Top-level ingestion settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngestConfig {
    /// Log statements instead of writing to the database
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Where the live store lives
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite database file, created on first use
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// HTTP settings for fetching recipe pages
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_database_path() -> String {
    "recipes.db".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeIngestBot/1.0)".to_string()
}

impl IngestConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_INGEST__ prefix
    /// 2. recipe-ingest.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_INGEST__DATABASE__PATH
    pub fn load() -> Result<Self, ConfigError> {
        load_config_from("recipe-ingest")
    }

    pub fn mode(&self) -> Mode {
        if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Live
        }
    }
}

/// Load configuration from an optional file (name without extension)
/// layered under `RECIPE_INGEST__*` environment variables.
pub fn load_config_from(file_stem: &str) -> Result<IngestConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file_stem).required(false))
        // Use double underscore for nested: RECIPE_INGEST__DATABASE__PATH
        .add_source(
            Environment::with_prefix("RECIPE_INGEST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
