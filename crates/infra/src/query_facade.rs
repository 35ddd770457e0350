//! Read-side lookups over calculation history and recipe usage.

use rust_decimal::Decimal;

use menuprofit_core::{DomainError, DomainResult, IngredientId, MenuItemId};
use menuprofit_profit::ProfitCalculationRecord;
use menuprofit_recipes::RecipeIngredient;

use crate::store::{CalculationStore, CatalogStore, RecipeLineStore, Stores};

#[derive(Debug, Clone)]
pub struct QueryFacade {
    stores: Stores,
}

impl QueryFacade {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Records whose margin lies in `[min, max]`. An inverted range yields an
    /// empty list, not an error.
    pub fn find_by_margin_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> DomainResult<Vec<ProfitCalculationRecord>> {
        if min > max {
            return Ok(Vec::new());
        }
        Ok(self.stores.calculations.find_by_profit_margin_range(min, max)?)
    }

    pub fn find_by_margin_at_least(&self, min: Decimal) -> DomainResult<Vec<ProfitCalculationRecord>> {
        Ok(self.stores.calculations.find_by_profit_margin_at_least(min)?)
    }

    pub fn calculations_for_menu_item(
        &self,
        menu_item_id: MenuItemId,
    ) -> DomainResult<Vec<ProfitCalculationRecord>> {
        Ok(self.stores.calculations.find_by_menu_item_id(menu_item_id)?)
    }

    /// Most recent calculation for the item, if it was ever costed.
    pub fn latest_for_menu_item(
        &self,
        menu_item_id: MenuItemId,
    ) -> DomainResult<Option<ProfitCalculationRecord>> {
        let history = self.stores.calculations.find_by_menu_item_id(menu_item_id)?;
        // `max_by_key` keeps the last maximum, so later appends win timestamp ties.
        Ok(history
            .into_iter()
            .max_by_key(ProfitCalculationRecord::calculated_at))
    }

    /// Every recipe line, across all menu items, that uses the ingredient.
    pub fn ingredient_usage(&self, ingredient_id: IngredientId) -> DomainResult<Vec<RecipeIngredient>> {
        if self.stores.ingredients.find_by_id(ingredient_id)?.is_none() {
            return Err(DomainError::not_found(format!("ingredient {ingredient_id} not found")));
        }
        Ok(self.stores.recipe_lines.find_by_ingredient_id(ingredient_id)?)
    }
}
