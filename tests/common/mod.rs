#![allow(dead_code)]

use std::collections::HashMap;

use recipe_ingest::store::{
    Row, SqlValue, Store, INSERT_INGREDIENT, INSERT_RECIPE, SELECT_INGREDIENT_ID,
};
use recipe_ingest::{IngredientSection, InstructionSection, RecipeRecord, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute(String, Vec<SqlValue>),
    ExecuteReturningId(String, Vec<SqlValue>),
    FetchOne(String, Vec<SqlValue>),
    Commit,
    Rollback,
    Close,
}

/// Store double that records every call and keeps just enough state
/// (known ingredient names) to answer lookups.
pub struct RecordingStore {
    pub calls: Vec<Call>,
    pub recipe_id: i64,
    pub ingredients: HashMap<String, i64>,
    next_ingredient_id: i64,
    /// Statements starting with this prefix fail
    pub fail_on: Option<&'static str>,
}

impl RecordingStore {
    pub fn new(recipe_id: i64) -> Self {
        Self {
            calls: Vec::new(),
            recipe_id,
            ingredients: HashMap::new(),
            next_ingredient_id: 1,
            fail_on: None,
        }
    }

    pub fn with_ingredient(mut self, name: &str, id: i64) -> Self {
        self.ingredients.insert(name.to_string(), id);
        self
    }

    /// Statements (of any kind) whose SQL starts with `prefix`
    pub fn statements(&self, prefix: &str) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| match call {
                Call::Execute(sql, _) | Call::ExecuteReturningId(sql, _) | Call::FetchOne(sql, _) => {
                    sql.starts_with(prefix)
                }
                _ => false,
            })
            .collect()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.statements(prefix).len()
    }

    pub fn commits(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Commit).count()
    }

    fn check(&self, sql: &str) -> Result<(), StoreError> {
        match self.fail_on {
            Some(prefix) if sql.starts_with(prefix) => {
                Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
            }
            _ => Ok(()),
        }
    }
}

fn text(params: &[SqlValue]) -> String {
    match params.first() {
        Some(SqlValue::Text(value)) => value.clone(),
        other => panic!("expected a text parameter, got {other:?}"),
    }
}

impl Store for RecordingStore {
    fn store_name(&self) -> &str {
        "recording"
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), StoreError> {
        self.calls.push(Call::Execute(sql.to_string(), params.to_vec()));
        self.check(sql)
    }

    fn execute_returning_id(&mut self, sql: &str, params: &[SqlValue]) -> Result<i64, StoreError> {
        self.calls
            .push(Call::ExecuteReturningId(sql.to_string(), params.to_vec()));
        self.check(sql)?;

        if sql == INSERT_RECIPE {
            return Ok(self.recipe_id);
        }
        let id = self.next_ingredient_id;
        self.next_ingredient_id += 1;
        if sql == INSERT_INGREDIENT {
            self.ingredients.insert(text(params), id);
        }
        Ok(id)
    }

    fn fetch_one(&mut self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, StoreError> {
        self.calls.push(Call::FetchOne(sql.to_string(), params.to_vec()));
        self.check(sql)?;

        if sql == SELECT_INGREDIENT_ID {
            return Ok(self
                .ingredients
                .get(&text(params))
                .map(|id| vec![SqlValue::Integer(*id)]));
        }
        Ok(None)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.calls.push(Call::Commit);
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        self.calls.push(Call::Rollback);
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.calls.push(Call::Close);
        Ok(())
    }
}

pub fn ingredient_section(label: &str, items: &[&str]) -> IngredientSection {
    IngredientSection {
        section: label.to_string(),
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn instruction_section(label: &str, steps: &[&str]) -> InstructionSection {
    InstructionSection {
        section: label.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

/// The rice-and-beans page as the collector emits it
pub fn rice_and_beans() -> RecipeRecord {
    RecipeRecord {
        title: Some("Instant Pot Rice and Beans Recipe".to_string()),
        url: "https://mygluten-freekitchen.com/instant-pot-rice-and-beans-recipe/".to_string(),
        ingredients: vec![ingredient_section(
            "General",
            &[
                "2 large peppers (medium or hot)",
                "1 can (16 oz.) black beans, drained and rinsed",
                "1 can (16 oz.) pinto beans, drained and rinsed",
                "1 can (15.5 oz.) enchilada sauce",
                "1 can (14.5 oz.) petite diced tomatoes in sauce",
                "1 1/2 cups white Basmati rice, uncooked",
                "2 cups vegetable broth",
                "1 cup sour cream",
                "2 cups shredded Mexican cheese",
            ],
        )],
        instructions: vec![instruction_section(
            "Instructions",
            &[
                "Slice the peppers, discard the seeds, and chop the peppers.",
                "Drain and rinse beans and add to pressure cooker.",
                "Add enchilada sauce and tomatoes to pressure cooker.",
                "Add uncooked white rice to pressure cooker.",
                "Pour vegetable broth over all. Don't stir!",
                "Close the lid on your Instant Pot.",
                "Stir in the sour cream.",
                "Stir in the shredded cheese.",
                "Serve immediately.",
            ],
        )],
    }
}

/// Two sections that share an ingredient name
pub fn layered_dip() -> RecipeRecord {
    RecipeRecord {
        title: Some("Layered Dip".to_string()),
        url: "https://example.com/layered-dip".to_string(),
        ingredients: vec![
            ingredient_section("Base", &["1 can refried beans", "1 cup salsa"]),
            ingredient_section("Topping", &["1/2 cup salsa", "Cilantro"]),
        ],
        instructions: vec![
            instruction_section("Base", &["Spread the beans.", "Add salsa."]),
            instruction_section("Topping", &["Top with salsa and cilantro."]),
        ],
    }
}
