use thiserror::Error;

/// Failures raised by a [`Store`](crate::store::Store) primitive
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying SQLite call failed (constraint violation, SQL error, I/O)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The connection was already released by `close()`
    #[error("Store connection is closed")]
    Closed,
}

/// Errors that can occur while ingesting recipes
#[derive(Error, Debug)]
pub enum IngestError {
    /// A store operation failed while processing a record
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    /// A record was rejected at the collector boundary
    #[error("Invalid recipe record: {0}")]
    InvalidRecord(String),

    /// Collector output could not be deserialized
    #[error("Failed to parse records: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to fetch a recipe page
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The fetched page has no recipe card to extract
    #[error("No recipe card found at {0}")]
    NoRecipeFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
