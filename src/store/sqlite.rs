use std::path::Path;

use log::{debug, info, warn};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension, ToSql};

use super::{Row, SqlValue, Store};
use crate::error::StoreError;

const SCHEMA_VERSION: i64 = 1;

/// Live store backed by a SQLite connection.
///
/// A transaction is opened by the first statement of each unit of work
/// and ended by `commit` or `rollback`. Closing or dropping the store
/// rolls back whatever is still open.
pub struct SqliteStore {
    conn: Option<Connection>,
    in_transaction: bool,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self::from_connection(conn)?;
        info!("Opened database connection.");
        debug!("SQLite database at {}", path.as_ref().display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self::from_connection(conn)?;
        info!("Opened database connection.");
        Ok(store)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        migrate(&conn)?;
        Ok(Self {
            conn: Some(conn),
            in_transaction: false,
        })
    }

    /// Borrow the underlying connection, e.g. to inspect committed rows
    pub fn connection(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::Closed)
    }

    fn begin(&mut self) -> Result<&Connection, StoreError> {
        let conn = self.conn.as_ref().ok_or(StoreError::Closed)?;
        if !self.in_transaction {
            conn.execute_batch("BEGIN")?;
            self.in_transaction = true;
        }
        Ok(conn)
    }
}

fn migrate(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                url TEXT NOT NULL,
                instructions TEXT
            );

            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id),
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                quantity REAL,
                unit TEXT,
                section_name TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe
                ON recipe_ingredients(recipe_id);",
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        debug!("Created schema version {}", SCHEMA_VERSION);
    }

    Ok(())
}

impl Store for SqliteStore {
    fn store_name(&self) -> &str {
        "sqlite"
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), StoreError> {
        let conn = self.begin()?;
        conn.execute(sql, params_from_iter(params))?;
        Ok(())
    }

    fn execute_returning_id(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64, StoreError> {
        let conn = self.begin()?;
        conn.execute(sql, params_from_iter(params))?;
        Ok(conn.last_insert_rowid())
    }

    fn fetch_one(&mut self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError> {
        let conn = self.begin()?;
        let mut stmt = conn.prepare(sql)?;
        let columns = stmt.column_count();
        let row = stmt
            .query_row(params_from_iter(params), |row| {
                (0..columns)
                    .map(|idx| row.get::<_, SqlValue>(idx))
                    .collect::<rusqlite::Result<Row>>()
            })
            .optional()?;
        Ok(row)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let conn = self.conn.as_ref().ok_or(StoreError::Closed)?;
        if self.in_transaction {
            conn.execute_batch("COMMIT")?;
            self.in_transaction = false;
        }
        info!("Committed recipe to database.");
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        let conn = self.conn.as_ref().ok_or(StoreError::Closed)?;
        if self.in_transaction {
            conn.execute_batch("ROLLBACK")?;
            self.in_transaction = false;
            debug!("Rolled back open transaction");
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.conn.is_none() {
            return Ok(());
        }
        self.rollback()?;
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| e)?;
        }
        info!("Closed database connection.");
        Ok(())
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        if let (Some(conn), true) = (self.conn.as_ref(), self.in_transaction) {
            if let Err(e) = conn.execute_batch("ROLLBACK") {
                warn!("Failed to roll back on drop: {}", e);
            }
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            SqlValue::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            SqlValue::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
        })
    }
}

impl FromSql for SqlValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(SqlValue::Null),
            ValueRef::Integer(value) => Ok(SqlValue::Integer(value)),
            ValueRef::Real(value) => Ok(SqlValue::Real(value)),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(|text| SqlValue::Text(text.to_string()))
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}
