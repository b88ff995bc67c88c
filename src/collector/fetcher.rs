use std::time::Duration;

use log::debug;
use reqwest::Client;

use super::extract_record;
use crate::config::FetchConfig;
use crate::error::IngestError;
use crate::model::RecipeRecord;

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page, returning the final URL (after redirects) and its body
    pub async fn fetch(&self, url: &str) -> Result<(String, String), IngestError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), final_url);
        Ok((final_url, html))
    }

    /// Fetch a recipe page and extract its record
    pub async fn fetch_record(&self, url: &str) -> Result<RecipeRecord, IngestError> {
        let (final_url, html) = self.fetch(url).await?;
        extract_record(&html, &final_url).ok_or(IngestError::NoRecipeFound(final_url))
    }
}
