use std::collections::BTreeSet;

use rust_decimal::Decimal;
use thiserror::Error;

use menuprofit_catalog::MenuItem;
use menuprofit_core::{
    CalculationId, CatalogEntity, CategoryId, DomainError, IngredientId, MenuItemId, RecipeLineId,
};
use menuprofit_profit::ProfitCalculationRecord;
use menuprofit_recipes::RecipeIngredient;

/// Store operation error.
///
/// These are **storage errors** (uniqueness constraints, concurrent writes,
/// backend failures) as opposed to domain validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint (case-insensitive name) rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A concurrent or conflicting write was detected (e.g. re-appending an
    /// existing calculation id).
    #[error("conflicting write: {0}")]
    Conflict(String),

    /// The backend could not serve the request.
    #[error("store backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UniqueViolation(msg) => DomainError::DuplicateName(msg),
            StoreError::Conflict(msg) => DomainError::Conflict(msg),
            StoreError::Backend(msg) => DomainError::Conflict(format!("store backend failure: {msg}")),
        }
    }
}

/// Storage for one kind of named catalog entity.
pub trait CatalogStore<E: CatalogEntity>: Send + Sync {
    /// Insert or replace by id. Fails with `UniqueViolation` when another
    /// entity of the same kind already holds the name (case-insensitive).
    fn save(&self, entity: E) -> StoreResult<E>;

    fn find_by_id(&self, id: E::Id) -> StoreResult<Option<E>>;

    fn find_by_name_ignore_case(&self, name: &str) -> StoreResult<Option<E>>;

    /// All entities in insertion order.
    fn find_all(&self) -> StoreResult<Vec<E>>;
}

/// Menu item storage, including the menu-item/category association table.
///
/// The association is a set of `(MenuItemId, CategoryId)` pairs; both the
/// "categories of an item" and "items in a category" views are derived from it.
pub trait MenuItemStore: CatalogStore<MenuItem> {
    /// Save the item and, when `categories` is `Some`, replace its category set
    /// wholesale. Both writes land together or not at all.
    fn save_with_categories(
        &self,
        item: MenuItem,
        categories: Option<BTreeSet<CategoryId>>,
    ) -> StoreResult<MenuItem>;

    fn category_ids_of(&self, menu_item_id: MenuItemId) -> StoreResult<BTreeSet<CategoryId>>;

    fn menu_item_ids_in(&self, category_id: CategoryId) -> StoreResult<Vec<MenuItemId>>;
}

/// Recipe line storage.
pub trait RecipeLineStore: Send + Sync {
    fn save(&self, line: RecipeIngredient) -> StoreResult<RecipeIngredient>;

    fn find_by_id(&self, id: RecipeLineId) -> StoreResult<Option<RecipeIngredient>>;

    /// Returns whether a line was removed.
    fn delete(&self, id: RecipeLineId) -> StoreResult<bool>;

    /// Lines of one menu item, in insertion order.
    fn find_by_menu_item_id(&self, menu_item_id: MenuItemId) -> StoreResult<Vec<RecipeIngredient>>;

    fn find_by_ingredient_id(&self, ingredient_id: IngredientId) -> StoreResult<Vec<RecipeIngredient>>;

    fn exists_by_menu_item_id(&self, menu_item_id: MenuItemId) -> StoreResult<bool>;

    /// Sum of quantities across all lines referencing the ingredient; zero if none.
    fn sum_quantity_by_ingredient_id(&self, ingredient_id: IngredientId) -> StoreResult<Decimal>;
}

/// Append-only storage for profit calculations.
pub trait CalculationStore: Send + Sync {
    /// Append a new record. Re-appending an existing id is a `Conflict`.
    fn append(&self, record: ProfitCalculationRecord) -> StoreResult<ProfitCalculationRecord>;

    fn find_by_id(&self, id: CalculationId) -> StoreResult<Option<ProfitCalculationRecord>>;

    /// History of one menu item, oldest first.
    fn find_by_menu_item_id(
        &self,
        menu_item_id: MenuItemId,
    ) -> StoreResult<Vec<ProfitCalculationRecord>>;

    fn find_all(&self) -> StoreResult<Vec<ProfitCalculationRecord>>;

    /// Records with `min <= margin <= max`.
    fn find_by_profit_margin_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> StoreResult<Vec<ProfitCalculationRecord>>;

    fn find_by_profit_margin_at_least(&self, min: Decimal) -> StoreResult<Vec<ProfitCalculationRecord>>;
}
