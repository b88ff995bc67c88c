//! Relational store primitives consumed by the pipeline.
//!
//! A [`Store`] is either the live SQLite connection or the log-only
//! dry-run stand-in. The pipeline is written once against the trait, so
//! the execution mode is decided by which store is opened.

mod dry_run;
mod sqlite;

pub use dry_run::DryRunStore;
pub use sqlite::SqliteStore;

use std::fmt;

use crate::error::StoreError;

pub const INSERT_RECIPE: &str = "INSERT INTO recipes (title, url) VALUES (?, ?)";
pub const SELECT_INGREDIENT_ID: &str = "SELECT id FROM ingredients WHERE name=?";
pub const INSERT_INGREDIENT: &str = "INSERT INTO ingredients (name) VALUES (?)";
pub const INSERT_RECIPE_INGREDIENT: &str = "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit, section_name) VALUES (?, ?, ?, ?, ?)";
pub const UPDATE_RECIPE_INSTRUCTIONS: &str = "UPDATE recipes SET instructions=? WHERE id=?";

/// A positional statement parameter or a fetched column value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "None"),
            SqlValue::Integer(value) => write!(f, "{value}"),
            SqlValue::Real(value) => write!(f, "{value:?}"),
            SqlValue::Text(value) => write!(f, "{value:?}"),
        }
    }
}

/// One fetched row, columns in select order
pub type Row = Vec<SqlValue>;

/// Render parameters as a tuple, e.g. `("Toast", "https://example.com")`
pub fn format_params(params: &[SqlValue]) -> String {
    let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("({})", rendered.join(", "))
}

/// Statement-level access to a relational store.
///
/// Writes issued after a `commit` or `rollback` belong to a new unit of
/// work; nothing is durable until `commit` returns. Implementations are
/// single-writer and hold no internal locking.
pub trait Store {
    /// Short name used in log messages (e.g. "sqlite", "dry-run")
    fn store_name(&self) -> &str;

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), StoreError>;

    /// Execute an insert and return the surrogate key it was assigned
    fn execute_returning_id(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64, StoreError>;

    fn fetch_one(&mut self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError>;

    fn commit(&mut self) -> Result<(), StoreError>;

    /// Abandon the current unit of work
    fn rollback(&mut self) -> Result<(), StoreError>;

    /// Release the connection. Further statements fail with `StoreError::Closed`.
    fn close(&mut self) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn store_name(&self) -> &str {
        (**self).store_name()
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), StoreError> {
        (**self).execute(sql, params)
    }

    fn execute_returning_id(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64, StoreError> {
        (**self).execute_returning_id(sql, params)
    }

    fn fetch_one(&mut self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError> {
        (**self).fetch_one(sql, params)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        (**self).commit()
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        (**self).rollback()
    }

    fn close(&mut self) -> Result<(), StoreError> {
        (**self).close()
    }
}
