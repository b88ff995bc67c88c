use serde::Deserialize;

use crate::error::IngestError;

/// One scraped recipe page, as produced by the source collector.
///
/// Records are immutable input: the pipeline reads them and hands them
/// back unchanged once their rows are written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeRecord {
    /// Page title; collectors emit `null` when the heading is missing
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientSection>,
    #[serde(default)]
    pub instructions: Vec<InstructionSection>,
}

impl RecipeRecord {
    /// Boundary check applied before a record enters the pipeline.
    ///
    /// Only the URL is required; a missing title is stored as NULL.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.url.trim().is_empty() {
            return Err(IngestError::InvalidRecord(format!(
                "record {:?} has an empty url",
                self.title.as_deref().unwrap_or("<untitled>")
            )));
        }
        Ok(())
    }
}

/// A labelled group of raw ingredient lines
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IngredientSection {
    #[serde(default = "default_ingredient_section")]
    pub section: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// A labelled group of instruction steps
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstructionSection {
    #[serde(default = "default_instruction_section")]
    pub section: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

pub(crate) fn default_ingredient_section() -> String {
    "General".to_string()
}

pub(crate) fn default_instruction_section() -> String {
    "Instructions".to_string()
}

/// Result of splitting one ingredient line.
///
/// `name` is lower-cased and trimmed; it is only empty when the source
/// line was blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredientLine {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub name: String,
}

/// A `recipe_ingredients` join row
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub section_name: String,
}
