//! The source collector boundary: everything that turns outside input
//! (JSON exports, recipe pages) into [`RecipeRecord`]s.

mod fetcher;
mod html;

pub use fetcher::PageFetcher;
pub use html::extract_record;

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::error::IngestError;
use crate::model::RecipeRecord;
use crate::runner::ItemFailure;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsInput {
    Many(Vec<RecipeRecord>),
    One(RecipeRecord),
}

/// Parse collector output: a JSON array of records or a single record
pub fn parse_records(json: &str) -> Result<Vec<RecipeRecord>, IngestError> {
    let input: RecordsInput = serde_json::from_str(json)?;
    match input {
        RecordsInput::Many(records) => Ok(records),
        RecordsInput::One(record) => Ok(vec![record]),
    }
}

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RecipeRecord>, IngestError> {
    let json = fs::read_to_string(path)?;
    parse_records(&json)
}

/// Records gathered from all inputs, plus the inputs that yielded nothing
#[derive(Debug, Default)]
pub struct Collected {
    pub records: Vec<RecipeRecord>,
    pub failures: Vec<ItemFailure>,
}

/// Gather records from JSON files and `http(s)://` recipe pages.
///
/// An input that cannot be read, fetched or extracted is logged and
/// recorded as a failure; the remaining inputs are still collected.
pub async fn collect_inputs(inputs: &[String], fetcher: &PageFetcher) -> Collected {
    let mut collected = Collected::default();

    for input in inputs {
        let result = if input.starts_with("http://") || input.starts_with("https://") {
            fetcher.fetch_record(input).await.map(|record| vec![record])
        } else {
            load_records(input)
        };

        match result {
            Ok(records) => {
                info!("Collected {} records from {}", records.len(), input);
                collected.records.extend(records);
            }
            Err(e) => {
                warn!("Skipping {}: {}", input, e);
                collected.failures.push(ItemFailure {
                    title: None,
                    url: input.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    collected
}
