//! Entity storage boundary.
//!
//! The engine never talks to a database directly; it consumes these traits.
//! A store is responsible for serialising concurrent writes and for enforcing
//! case-insensitive name uniqueness at write time, reporting violations as
//! [`StoreError`] rather than silently overwriting.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{
    InMemoryCalculationStore, InMemoryCatalogStore, InMemoryMenuItemStore, InMemoryRecipeLineStore,
};
pub use r#trait::{
    CalculationStore, CatalogStore, MenuItemStore, RecipeLineStore, StoreError, StoreResult,
};

use std::sync::Arc;

use menuprofit_catalog::{Category, Ingredient};

/// The full set of stores the engine runs against.
#[derive(Clone)]
pub struct Stores {
    pub ingredients: Arc<dyn CatalogStore<Ingredient>>,
    pub categories: Arc<dyn CatalogStore<Category>>,
    pub menu_items: Arc<dyn MenuItemStore>,
    pub recipe_lines: Arc<dyn RecipeLineStore>,
    pub calculations: Arc<dyn CalculationStore>,
}

impl Stores {
    /// Fresh, empty in-memory stores (tests/dev).
    pub fn in_memory() -> Self {
        Self {
            ingredients: Arc::new(InMemoryCatalogStore::<Ingredient>::new()),
            categories: Arc::new(InMemoryCatalogStore::<Category>::new()),
            menu_items: Arc::new(InMemoryMenuItemStore::new()),
            recipe_lines: Arc::new(InMemoryRecipeLineStore::new()),
            calculations: Arc::new(InMemoryCalculationStore::new()),
        }
    }
}

impl core::fmt::Debug for Stores {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
