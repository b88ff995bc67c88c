use log::{debug, info};

use super::{format_params, Row, SqlValue, Store};
use crate::error::StoreError;

/// Log-only store used for dry runs.
///
/// No connection is ever opened. Every statement is rendered as a
/// `[DRY RUN]` line, logged at debug level and kept in a journal so a
/// run can be inspected afterwards. Inserts report the sentinel id `0`
/// and lookups always miss.
#[derive(Debug, Default)]
pub struct DryRunStore {
    journal: Vec<String>,
}

impl DryRunStore {
    pub const SENTINEL_ID: i64 = 0;

    pub fn new() -> Self {
        info!("Dry run mode enabled: No database connection.");
        Self::default()
    }

    /// Every line logged so far, oldest first
    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    fn record(&mut self, line: String) {
        debug!("{}", line);
        self.journal.push(line);
    }

    fn record_statement(&mut self, sql: &str, params: &[SqlValue]) {
        self.record(format!(
            "[DRY RUN] SQL: {} | Params: {}",
            sql,
            format_params(params)
        ));
    }
}

impl Store for DryRunStore {
    fn store_name(&self) -> &str {
        "dry-run"
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), StoreError> {
        self.record_statement(sql, params);
        Ok(())
    }

    fn execute_returning_id(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64, StoreError> {
        self.record_statement(sql, params);
        Ok(Self::SENTINEL_ID)
    }

    fn fetch_one(&mut self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError> {
        self.record_statement(sql, params);
        Ok(None)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let line = "Dry run: skipped commit.".to_string();
        info!("{}", line);
        self.journal.push(line);
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
