use log::{info, warn};

use crate::model::RecipeRecord;
use crate::pipeline::RecipePipeline;
use crate::store::Store;

/// A record that was discarded during a run
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub title: Option<String>,
    pub url: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: Vec<ItemFailure>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Feed `records` through the pipeline one at a time.
///
/// A record that fails validation or processing is discarded: its
/// uncommitted writes are rolled back and the failure is recorded, then
/// the run moves on. Nothing is retried.
pub fn run<S: Store>(pipeline: &mut RecipePipeline<S>, records: &[RecipeRecord]) -> RunSummary {
    let mut summary = RunSummary::default();

    for (index, record) in records.iter().enumerate() {
        info!(
            "Recipe {}/{}: {}",
            index + 1,
            records.len(),
            record.title.as_deref().unwrap_or("<untitled>")
        );

        let result = record
            .validate()
            .and_then(|()| pipeline.process_item(record).map_err(Into::into));

        match result {
            Ok(_) => summary.processed += 1,
            Err(e) => {
                warn!("Discarding {}: {}", record.url, e);
                if let Err(rollback_err) = pipeline.discard() {
                    warn!("Rollback after failure also failed: {}", rollback_err);
                }
                summary.failed.push(ItemFailure {
                    title: record.title.clone(),
                    url: record.url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Run finished: {} processed, {} failed",
        summary.processed,
        summary.failed.len()
    );
    summary
}
