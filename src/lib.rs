pub mod collector;
pub mod config;
pub mod error;
pub mod ingredient_parser;
pub mod instructions;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod runner;
pub mod store;

// Re-export commonly used types
pub use crate::config::IngestConfig;
pub use error::{IngestError, StoreError};
pub use model::{IngredientSection, InstructionSection, ParsedIngredientLine, RecipeRecord};
pub use pipeline::{Mode, RecipePipeline};
pub use runner::{run, RunSummary};
