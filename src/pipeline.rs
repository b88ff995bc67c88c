use log::{debug, info};

use crate::config::IngestConfig;
use crate::error::{IngestError, StoreError};
use crate::ingredient_parser::parse_ingredient_line;
use crate::instructions::flatten_instructions;
use crate::model::{RecipeIngredient, RecipeRecord};
use crate::registry::IngredientRegistry;
use crate::store::{
    DryRunStore, SqlValue, SqliteStore, Store, INSERT_RECIPE, INSERT_RECIPE_INGREDIENT,
    UPDATE_RECIPE_INSTRUCTIONS,
};

/// Execution mode, fixed when the pipeline is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Real store I/O, one commit per recipe
    #[default]
    Live,
    /// No store I/O; statements are logged instead
    DryRun,
}

/// Writes recipe records into the store, one transaction per record.
///
/// The pipeline owns its store for the whole run. Records must be fed
/// one at a time; there is no internal locking.
pub struct RecipePipeline<S: Store = Box<dyn Store>> {
    store: S,
}

impl RecipePipeline {
    /// Open a pipeline for `config`: a SQLite connection in live mode,
    /// a [`DryRunStore`] otherwise.
    pub fn open(config: &IngestConfig) -> Result<Self, IngestError> {
        let store: Box<dyn Store> = match config.mode() {
            Mode::Live => Box::new(SqliteStore::open(&config.database.path)?),
            Mode::DryRun => Box::new(DryRunStore::new()),
        };
        Ok(Self::new(store))
    }
}

impl<S: Store> RecipePipeline<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist one record and commit it.
    ///
    /// Store failures are returned as-is, without retry or rollback; the
    /// caller decides what happens to the open unit of work (see
    /// [`RecipePipeline::discard`]). The record is handed back unchanged.
    pub fn process_item<'r>(
        &mut self,
        record: &'r RecipeRecord,
    ) -> Result<&'r RecipeRecord, StoreError> {
        debug!(
            "Processing {:?} ({}) with {} store",
            record.title,
            record.url,
            self.store.store_name()
        );

        let recipe_id = self.insert_recipe(record)?;

        for section in &record.ingredients {
            for line in &section.items {
                let parsed = parse_ingredient_line(line);
                let ingredient_id =
                    IngredientRegistry::new(&mut self.store).get_or_create(&parsed.name)?;
                self.insert_recipe_ingredient(&RecipeIngredient {
                    recipe_id,
                    ingredient_id,
                    quantity: parsed.quantity,
                    unit: parsed.unit,
                    section_name: section.section.clone(),
                })?;
            }
        }

        let instructions = flatten_instructions(&record.instructions);
        self.update_recipe_instructions(recipe_id, &instructions)?;

        self.store.commit()?;
        Ok(record)
    }

    /// Abandon whatever the last failed `process_item` left uncommitted
    pub fn discard(&mut self) -> Result<(), StoreError> {
        self.store.rollback()
    }

    /// Release the store. Consumes the pipeline so it cannot be reused.
    pub fn close(mut self) -> Result<S, StoreError> {
        self.store.close()?;
        info!("Pipeline closed ({})", self.store.store_name());
        Ok(self.store)
    }

    fn insert_recipe(&mut self, record: &RecipeRecord) -> Result<i64, StoreError> {
        let params = [
            SqlValue::from(record.title.as_deref()),
            SqlValue::from(record.url.as_str()),
        ];
        self.store.execute_returning_id(INSERT_RECIPE, &params)
    }

    fn insert_recipe_ingredient(&mut self, row: &RecipeIngredient) -> Result<(), StoreError> {
        let params = [
            SqlValue::from(row.recipe_id),
            SqlValue::from(row.ingredient_id),
            SqlValue::from(row.quantity),
            SqlValue::from(row.unit.as_deref()),
            SqlValue::from(row.section_name.as_str()),
        ];
        self.store.execute(INSERT_RECIPE_INGREDIENT, &params)
    }

    fn update_recipe_instructions(
        &mut self,
        recipe_id: i64,
        instructions: &str,
    ) -> Result<(), StoreError> {
        let params = [SqlValue::from(instructions), SqlValue::from(recipe_id)];
        self.store.execute(UPDATE_RECIPE_INSTRUCTIONS, &params)
    }
}
