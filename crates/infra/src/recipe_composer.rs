//! Recipe lines: attaching ingredients (with quantities) to menu items.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use menuprofit_core::{DomainError, DomainResult, IngredientId, MenuItemId, RecipeLineId};
use menuprofit_recipes::RecipeIngredient;

use crate::store::{CatalogStore, RecipeLineStore, Stores};

/// Owns the recipe line lifecycle and keeps every line pointing at an
/// existing ingredient and menu item.
#[derive(Debug, Clone)]
pub struct RecipeComposer {
    stores: Stores,
}

impl RecipeComposer {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Add a line to a menu item's recipe.
    ///
    /// The quantity is validated before any lookup. Adding an ingredient that
    /// is already on the recipe creates a second, separate line.
    #[instrument(skip(self), err)]
    pub fn add_line(
        &self,
        menu_item_id: MenuItemId,
        ingredient_id: IngredientId,
        quantity: Option<Decimal>,
    ) -> DomainResult<RecipeIngredient> {
        let line = RecipeIngredient::new(RecipeLineId::new(), menu_item_id, ingredient_id, quantity)?;

        if self.stores.ingredients.find_by_id(ingredient_id)?.is_none() {
            return Err(DomainError::not_found(format!("ingredient {ingredient_id} not found")));
        }
        if self.stores.menu_items.find_by_id(menu_item_id)?.is_none() {
            return Err(DomainError::not_found(format!("menu item {menu_item_id} not found")));
        }

        let saved = self.stores.recipe_lines.save(line)?;
        info!(line_id = %saved.id_typed(), quantity = %saved.quantity(), "recipe line added");
        Ok(saved)
    }

    #[instrument(skip(self), err)]
    pub fn update_line_quantity(
        &self,
        line_id: RecipeLineId,
        quantity: Decimal,
    ) -> DomainResult<RecipeIngredient> {
        let existing = self.get_line(line_id)?;
        let updated = existing.with_quantity(quantity)?;
        let saved = self.stores.recipe_lines.save(updated)?;
        info!(quantity = %saved.quantity(), "recipe line quantity updated");
        Ok(saved)
    }

    #[instrument(skip(self), err)]
    pub fn remove_line(&self, line_id: RecipeLineId) -> DomainResult<()> {
        if !self.stores.recipe_lines.delete(line_id)? {
            return Err(line_not_found(line_id));
        }
        info!("recipe line removed");
        Ok(())
    }

    pub fn get_line(&self, line_id: RecipeLineId) -> DomainResult<RecipeIngredient> {
        self.stores
            .recipe_lines
            .find_by_id(line_id)?
            .ok_or_else(|| line_not_found(line_id))
    }

    /// Lines in insertion order; empty when the item has no recipe (or does
    /// not exist).
    pub fn lines_for_menu_item(&self, menu_item_id: MenuItemId) -> DomainResult<Vec<RecipeIngredient>> {
        Ok(self.stores.recipe_lines.find_by_menu_item_id(menu_item_id)?)
    }

    pub fn has_any_line(&self, menu_item_id: MenuItemId) -> DomainResult<bool> {
        Ok(self.stores.recipe_lines.exists_by_menu_item_id(menu_item_id)?)
    }

    /// Quantity of the ingredient required across every recipe; zero if unused.
    pub fn total_quantity_for_ingredient(&self, ingredient_id: IngredientId) -> DomainResult<Decimal> {
        Ok(self
            .stores
            .recipe_lines
            .sum_quantity_by_ingredient_id(ingredient_id)?)
    }

    pub fn lines_using_ingredient(&self, ingredient_id: IngredientId) -> DomainResult<Vec<RecipeIngredient>> {
        Ok(self.stores.recipe_lines.find_by_ingredient_id(ingredient_id)?)
    }
}

fn line_not_found(line_id: RecipeLineId) -> DomainError {
    DomainError::not_found(format!("recipe line {line_id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_manager::CatalogManager;
    use menuprofit_catalog::{IngredientDraft, MenuItemDraft};
    use rust_decimal_macros::dec;

    fn setup() -> (CatalogManager, RecipeComposer, MenuItemId, IngredientId) {
        let stores = Stores::in_memory();
        let recipes = RecipeComposer::new(stores.clone());
        let catalog = CatalogManager::new(stores, recipes.clone());

        let item = catalog
            .create_menu_item(MenuItemDraft {
                name: "Pancakes".to_string(),
                description: None,
                selling_price: Some(dec!(8)),
                active: true,
                categories: None,
            })
            .unwrap();
        let flour = catalog
            .create_ingredient(IngredientDraft {
                name: "Flour".to_string(),
                unit: "kg".to_string(),
                cost_per_unit: Some(dec!(1.20)),
                active: true,
            })
            .unwrap();

        (catalog, recipes, item.id_typed(), flour.id_typed())
    }

    #[test]
    fn add_line_validates_quantity_before_references() {
        let (_, recipes, _, _) = setup();
        // Both references are unknown, yet the quantity error wins.
        let err = recipes
            .add_line(MenuItemId::new(), IngredientId::new(), Some(dec!(0)))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));

        let err = recipes
            .add_line(MenuItemId::new(), IngredientId::new(), None)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
    }

    #[test]
    fn add_line_requires_existing_ingredient_and_menu_item() {
        let (_, recipes, item, flour) = setup();

        let err = recipes
            .add_line(item, IngredientId::new(), Some(dec!(1)))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = recipes
            .add_line(MenuItemId::new(), flour, Some(dec!(1)))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        assert!(!recipes.has_any_line(item).unwrap());
    }

    #[test]
    fn duplicate_ingredient_lines_stay_separate() {
        let (_, recipes, item, flour) = setup();
        let first = recipes.add_line(item, flour, Some(dec!(0.2))).unwrap();
        let second = recipes.add_line(item, flour, Some(dec!(0.3))).unwrap();

        let lines = recipes.lines_for_menu_item(item).unwrap();
        assert_eq!(lines, vec![first, second]);
        assert_eq!(recipes.total_quantity_for_ingredient(flour).unwrap(), dec!(0.5));
    }

    #[test]
    fn update_line_quantity_checks_existence_then_value() {
        let (_, recipes, item, flour) = setup();
        let line = recipes.add_line(item, flour, Some(dec!(1))).unwrap();

        let err = recipes
            .update_line_quantity(RecipeLineId::new(), dec!(-1))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = recipes
            .update_line_quantity(line.id_typed(), dec!(0))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
        assert_eq!(recipes.get_line(line.id_typed()).unwrap().quantity().value(), dec!(1));

        let updated = recipes.update_line_quantity(line.id_typed(), dec!(2.5)).unwrap();
        assert_eq!(updated.quantity().value(), dec!(2.5));
        assert_eq!(recipes.total_quantity_for_ingredient(flour).unwrap(), dec!(2.5));
    }

    #[test]
    fn remove_line_deletes_once() {
        let (_, recipes, item, flour) = setup();
        let line = recipes.add_line(item, flour, Some(dec!(1))).unwrap();

        recipes.remove_line(line.id_typed()).unwrap();
        assert!(!recipes.has_any_line(item).unwrap());

        let err = recipes.remove_line(line.id_typed()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn total_quantity_for_unused_ingredient_is_zero() {
        let (_, recipes, _, flour) = setup();
        assert_eq!(recipes.total_quantity_for_ingredient(flour).unwrap(), Decimal::ZERO);
        assert_eq!(
            recipes.total_quantity_for_ingredient(IngredientId::new()).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn lines_for_unknown_menu_item_is_empty() {
        let (_, recipes, _, _) = setup();
        assert!(recipes.lines_for_menu_item(MenuItemId::new()).unwrap().is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: quantities > 0 are accepted by add/update, quantities <= 0 are rejected.
            #[test]
            fn quantity_sign_decides_add_and_update(mantissa in -100_000i64..100_000, scale in 0u32..4) {
                let (_, recipes, item, flour) = setup();
                let quantity = Decimal::new(mantissa, scale);

                let added = recipes.add_line(item, flour, Some(quantity));
                let existing = recipes.add_line(item, flour, Some(dec!(1))).unwrap();
                let updated = recipes.update_line_quantity(existing.id_typed(), quantity);

                if quantity > Decimal::ZERO {
                    prop_assert!(added.is_ok());
                    prop_assert!(updated.is_ok());
                } else {
                    let add_invalid = matches!(added, Err(DomainError::InvalidValue(_)));
                    let update_invalid = matches!(updated, Err(DomainError::InvalidValue(_)));
                    prop_assert!(add_invalid);
                    prop_assert!(update_invalid);
                }
            }
        }
    }
}
