use log::debug;

use crate::error::StoreError;
use crate::store::{SqlValue, Store, INSERT_INGREDIENT, SELECT_INGREDIENT_ID};

/// Lookup-or-create access to the global `ingredients` table.
///
/// The lookup and the insert are two separate statements, so the
/// registry relies on having exclusive use of the store: the `&mut`
/// borrow keeps other writers out for its lifetime, and the unique
/// index on `ingredients.name` turns any outside race into a store
/// failure instead of a duplicate row.
pub struct IngredientRegistry<'a, S: Store + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: Store + ?Sized> IngredientRegistry<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Return the id of the ingredient named `name`, inserting it first
    /// if it is not yet known. `name` must already be normalized.
    pub fn get_or_create(&mut self, name: &str) -> Result<i64, StoreError> {
        let params = [SqlValue::from(name)];

        if let Some(row) = self.store.fetch_one(SELECT_INGREDIENT_ID, &params)? {
            if let Some(id) = row.first().and_then(|value| value.as_i64()) {
                debug!("Ingredient {:?} already registered as {}", name, id);
                return Ok(id);
            }
        }

        let id = self.store.execute_returning_id(INSERT_INGREDIENT, &params)?;
        debug!("Registered ingredient {:?} as {}", name, id);
        Ok(id)
    }
}
