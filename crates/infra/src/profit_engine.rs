//! Profit calculation: cost a menu item's current recipe and append the result
//! to its history.

use chrono::Utc;
use tracing::{info, instrument};

use menuprofit_catalog::{Ingredient, MenuItem};
use menuprofit_core::{CalculationId, DomainError, DomainResult, MenuItemId};
use menuprofit_profit::{compute_breakdown, CostLine, ProfitCalculationRecord};

use crate::recipe_composer::RecipeComposer;
use crate::store::{CalculationStore, CatalogStore, Stores};

/// Read-only over the catalog and recipes; the only writer of calculation
/// records.
#[derive(Debug, Clone)]
pub struct ProfitEngine {
    stores: Stores,
    recipes: RecipeComposer,
    margin_scale: u32,
}

impl ProfitEngine {
    pub fn new(stores: Stores, recipes: RecipeComposer, margin_scale: u32) -> Self {
        Self {
            stores,
            recipes,
            margin_scale,
        }
    }

    /// Compute cost and margin from the item's current recipe and persist a
    /// new record. Repeated calls grow the history; earlier records are never
    /// touched.
    #[instrument(skip(self), err)]
    pub fn calculate_profit(&self, menu_item_id: MenuItemId) -> DomainResult<ProfitCalculationRecord> {
        let item: MenuItem = self
            .stores
            .menu_items
            .find_by_id(menu_item_id)?
            .ok_or_else(|| DomainError::not_found(format!("menu item {menu_item_id} not found")))?;

        let lines = self.recipes.lines_for_menu_item(menu_item_id)?;
        let cost_lines = lines
            .iter()
            .map(|line| -> DomainResult<CostLine> {
                let ingredient: Ingredient = self
                    .stores
                    .ingredients
                    .find_by_id(line.ingredient_id())?
                    .ok_or_else(|| {
                        DomainError::not_found(format!(
                            "ingredient {} referenced by recipe line {} not found",
                            line.ingredient_id(),
                            line.id_typed()
                        ))
                    })?;
                Ok(CostLine {
                    cost_per_unit: ingredient.cost_per_unit(),
                    quantity: line.quantity(),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let breakdown = compute_breakdown(item.selling_price(), &cost_lines, self.margin_scale)?;
        let record = ProfitCalculationRecord::new(
            CalculationId::new(),
            menu_item_id,
            &breakdown,
            Utc::now(),
        );
        let saved = self.stores.calculations.append(record)?;

        info!(
            calculation_id = %saved.id_typed(),
            total_cost = %saved.total_cost(),
            margin = %saved.profit_margin(),
            "profit calculated"
        );
        Ok(saved)
    }

    pub fn get_calculation(&self, id: CalculationId) -> DomainResult<ProfitCalculationRecord> {
        self.stores
            .calculations
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found(format!("profit calculation {id} not found")))
    }

    /// History of one item, oldest first.
    pub fn calculations_for_menu_item(
        &self,
        menu_item_id: MenuItemId,
    ) -> DomainResult<Vec<ProfitCalculationRecord>> {
        Ok(self.stores.calculations.find_by_menu_item_id(menu_item_id)?)
    }

    pub fn all_calculations(&self) -> DomainResult<Vec<ProfitCalculationRecord>> {
        Ok(self.stores.calculations.find_all()?)
    }
}
