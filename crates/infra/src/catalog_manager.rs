//! Catalog lifecycle: ingredients, categories and menu items.
//!
//! Every write follows the same shape: load (for updates), validate the full
//! new state, check name uniqueness, then issue a single store write. Nothing
//! is written until all checks have passed, so a rejected update leaves the
//! stored entity exactly as it was.
//!
//! Uniqueness is pre-checked here for a clear error, and enforced again by the
//! store at write time; a store-side rejection surfaces as `DuplicateName` too.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, instrument, warn};

use menuprofit_catalog::{
    Category, CategoryDraft, Ingredient, IngredientDraft, MenuItem, MenuItemDraft,
};
use menuprofit_core::{
    CatalogEntity, CategoryId, DomainError, DomainResult, IngredientId, MenuItemId,
};

use crate::recipe_composer::RecipeComposer;
use crate::store::{CatalogStore, MenuItemStore, Stores};

/// A menu item together with the ids of its categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemWithCategories {
    pub item: MenuItem,
    pub category_ids: BTreeSet<CategoryId>,
}

#[derive(Debug, Clone)]
pub struct CatalogManager {
    stores: Stores,
    recipes: RecipeComposer,
}

fn load<E, S>(store: &S, id: E::Id) -> DomainResult<E>
where
    E: CatalogEntity,
    S: CatalogStore<E> + ?Sized,
{
    store
        .find_by_id(id)?
        .ok_or_else(|| DomainError::not_found(format!("{} {id} not found", E::KIND)))
}

/// Fails when another entity of the same kind already uses `name`.
fn ensure_name_free<E, S>(store: &S, name: &str, owner: Option<E::Id>) -> DomainResult<()>
where
    E: CatalogEntity,
    S: CatalogStore<E> + ?Sized,
{
    match store.find_by_name_ignore_case(name)? {
        Some(existing) if Some(*existing.id()) != owner => {
            warn!(kind = E::KIND, name, "duplicate catalog name rejected");
            Err(DomainError::duplicate_name(format!(
                "{} with name '{}' already exists",
                E::KIND,
                name.trim()
            )))
        }
        _ => Ok(()),
    }
}

impl CatalogManager {
    pub fn new(stores: Stores, recipes: RecipeComposer) -> Self {
        Self { stores, recipes }
    }

    // Ingredients

    #[instrument(skip(self, draft), fields(name = %draft.name), err)]
    pub fn create_ingredient(&self, draft: IngredientDraft) -> DomainResult<Ingredient> {
        let store = &*self.stores.ingredients;
        ensure_name_free::<Ingredient, _>(store, &draft.name, None)?;
        let ingredient = Ingredient::create(IngredientId::new(), &draft)?;
        let saved = store.save(ingredient)?;
        info!(ingredient_id = %saved.id_typed(), "ingredient created");
        Ok(saved)
    }

    #[instrument(skip(self, draft), err)]
    pub fn update_ingredient(&self, id: IngredientId, draft: IngredientDraft) -> DomainResult<Ingredient> {
        let store = &*self.stores.ingredients;
        let existing: Ingredient = load(store, id)?;
        let revised = existing.revise(&draft)?;
        ensure_name_free::<Ingredient, _>(store, revised.name(), Some(id))?;
        let saved = store.save(revised)?;
        info!(active = saved.is_active(), "ingredient updated");
        Ok(saved)
    }

    pub fn get_ingredient(&self, id: IngredientId) -> DomainResult<Ingredient> {
        load(&*self.stores.ingredients, id)
    }

    pub fn list_ingredients(&self) -> DomainResult<Vec<Ingredient>> {
        Ok(self.stores.ingredients.find_all()?)
    }

    /// Idempotent: deactivating an inactive ingredient succeeds.
    #[instrument(skip(self), err)]
    pub fn deactivate_ingredient(&self, id: IngredientId) -> DomainResult<Ingredient> {
        let store = &*self.stores.ingredients;
        let mut ingredient: Ingredient = load(store, id)?;
        ingredient.deactivate();
        let saved = store.save(ingredient)?;
        info!("ingredient deactivated");
        Ok(saved)
    }

    // Categories

    #[instrument(skip(self, draft), fields(name = %draft.name), err)]
    pub fn create_category(&self, draft: CategoryDraft) -> DomainResult<Category> {
        let store = &*self.stores.categories;
        ensure_name_free::<Category, _>(store, &draft.name, None)?;
        let category = Category::create(CategoryId::new(), &draft)?;
        let saved = store.save(category)?;
        info!(category_id = %saved.id_typed(), "category created");
        Ok(saved)
    }

    #[instrument(skip(self, draft), err)]
    pub fn update_category(&self, id: CategoryId, draft: CategoryDraft) -> DomainResult<Category> {
        let store = &*self.stores.categories;
        let existing: Category = load(store, id)?;
        let revised = existing.revise(&draft)?;
        ensure_name_free::<Category, _>(store, revised.name(), Some(id))?;
        let saved = store.save(revised)?;
        info!(active = saved.is_active(), "category updated");
        Ok(saved)
    }

    pub fn get_category(&self, id: CategoryId) -> DomainResult<Category> {
        load(&*self.stores.categories, id)
    }

    pub fn list_categories(&self) -> DomainResult<Vec<Category>> {
        Ok(self.stores.categories.find_all()?)
    }

    /// Idempotent. Existing menu item associations are kept; the category just
    /// cannot be newly attached while inactive.
    #[instrument(skip(self), err)]
    pub fn deactivate_category(&self, id: CategoryId) -> DomainResult<Category> {
        let store = &*self.stores.categories;
        let mut category: Category = load(store, id)?;
        category.deactivate();
        let saved = store.save(category)?;
        info!("category deactivated");
        Ok(saved)
    }

    /// Menu items currently associated with the category.
    pub fn menu_items_in_category(&self, category_id: CategoryId) -> DomainResult<Vec<MenuItem>> {
        let _: Category = load(&*self.stores.categories, category_id)?;
        let menu_items = &*self.stores.menu_items;
        menu_items
            .menu_item_ids_in(category_id)?
            .into_iter()
            .map(|id| load::<MenuItem, _>(menu_items, id))
            .collect()
    }

    // Menu items

    #[instrument(skip(self, draft), fields(name = %draft.name), err)]
    pub fn create_menu_item(&self, draft: MenuItemDraft) -> DomainResult<MenuItem> {
        let store = &*self.stores.menu_items;
        ensure_name_free::<MenuItem, _>(store, &draft.name, None)?;
        let item = MenuItem::create(MenuItemId::new(), &draft)?;
        let categories = self.resolve_categories(draft.categories.as_ref())?;
        let saved = store.save_with_categories(item, categories)?;
        info!(menu_item_id = %saved.id_typed(), "menu item created");
        Ok(saved)
    }

    /// Full replace of a menu item.
    ///
    /// Activation requires at least one recipe line. A `Some` category set must
    /// name only existing, active categories and replaces the association
    /// wholesale; `None` keeps the current association.
    #[instrument(skip(self, draft), fields(active = draft.active), err)]
    pub fn update_menu_item(&self, id: MenuItemId, draft: MenuItemDraft) -> DomainResult<MenuItem> {
        let store = &*self.stores.menu_items;
        let existing: MenuItem = load(store, id)?;

        let has_recipe_lines = draft.active && self.recipes.has_any_line(id)?;
        let revised = existing.revise(&draft, has_recipe_lines).inspect_err(|e| {
            warn!(error = %e, "menu item update rejected");
        })?;
        let categories = self.resolve_categories(draft.categories.as_ref())?;
        ensure_name_free::<MenuItem, _>(store, revised.name(), Some(id))?;

        let saved = store.save_with_categories(revised, categories)?;
        info!("menu item updated");
        Ok(saved)
    }

    pub fn get_menu_item(&self, id: MenuItemId) -> DomainResult<MenuItem> {
        load(&*self.stores.menu_items, id)
    }

    pub fn list_menu_items(&self) -> DomainResult<Vec<MenuItem>> {
        Ok(self.stores.menu_items.find_all()?)
    }

    /// Active menu items with their category ids.
    pub fn list_active_menu_items(&self) -> DomainResult<Vec<MenuItemWithCategories>> {
        let store = &*self.stores.menu_items;
        store
            .find_all()?
            .into_iter()
            .filter(|item| item.is_active())
            .map(|item| -> DomainResult<MenuItemWithCategories> {
                let category_ids = store.category_ids_of(item.id_typed())?;
                Ok(MenuItemWithCategories { item, category_ids })
            })
            .collect()
    }

    pub fn categories_of_menu_item(&self, id: MenuItemId) -> DomainResult<Vec<Category>> {
        let store = &*self.stores.menu_items;
        let _: MenuItem = load(store, id)?;
        store
            .category_ids_of(id)?
            .into_iter()
            .map(|category_id| load::<Category, _>(&*self.stores.categories, category_id))
            .collect()
    }

    #[instrument(skip(self), err)]
    pub fn deactivate_menu_item(&self, id: MenuItemId) -> DomainResult<MenuItem> {
        let store = &*self.stores.menu_items;
        let mut item: MenuItem = load(store, id)?;
        item.deactivate();
        let saved = store.save(item)?;
        info!("menu item deactivated");
        Ok(saved)
    }

    /// Every requested category must exist and be active.
    fn resolve_categories(
        &self,
        requested: Option<&BTreeSet<CategoryId>>,
    ) -> DomainResult<Option<BTreeSet<CategoryId>>> {
        let Some(requested) = requested else {
            return Ok(None);
        };
        for category_id in requested {
            let category: Category = load(&*self.stores.categories, *category_id)?;
            category.ensure_assignable().inspect_err(|e| {
                warn!(category_id = %category_id, error = %e, "category assignment rejected");
            })?;
        }
        Ok(Some(requested.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup() -> (CatalogManager, RecipeComposer) {
        let stores = Stores::in_memory();
        let recipes = RecipeComposer::new(stores.clone());
        (CatalogManager::new(stores, recipes.clone()), recipes)
    }

    fn ingredient(name: &str) -> IngredientDraft {
        IngredientDraft {
            name: name.to_string(),
            unit: "unit".to_string(),
            cost_per_unit: Some(dec!(5.00)),
            active: true,
        }
    }

    fn category(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            description: None,
            active: true,
        }
    }

    fn menu_item(name: &str) -> MenuItemDraft {
        MenuItemDraft {
            name: name.to_string(),
            description: None,
            selling_price: Some(dec!(20.00)),
            active: false,
            categories: None,
        }
    }

    #[test]
    fn create_ingredient_rejects_case_insensitive_duplicate() {
        let (catalog, _) = setup();
        catalog.create_ingredient(ingredient("Cheese")).unwrap();

        let err = catalog.create_ingredient(ingredient("CHEESE")).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateName(_)));
        assert_eq!(catalog.list_ingredients().unwrap().len(), 1);
    }

    #[test]
    fn create_ingredient_rejects_non_positive_cost() {
        let (catalog, _) = setup();
        let err = catalog
            .create_ingredient(IngredientDraft {
                cost_per_unit: Some(dec!(0)),
                ..ingredient("Salt")
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
        assert!(catalog.list_ingredients().unwrap().is_empty());
    }

    #[test]
    fn create_menu_item_rejects_missing_price() {
        let (catalog, _) = setup();
        let err = catalog
            .create_menu_item(MenuItemDraft {
                selling_price: None,
                ..menu_item("Burger")
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));
    }

    #[test]
    fn created_entities_are_active() {
        let (catalog, _) = setup();
        let ingredient = catalog
            .create_ingredient(IngredientDraft { active: false, ..ingredient("Cheese") })
            .unwrap();
        let category = catalog
            .create_category(CategoryDraft { active: false, ..category("Mains") })
            .unwrap();
        let item = catalog.create_menu_item(menu_item("Burger")).unwrap();

        assert!(ingredient.is_active());
        assert!(category.is_active());
        assert!(item.is_active());
    }

    #[test]
    fn update_is_full_replace() {
        let (catalog, _) = setup();
        let cheese = catalog.create_ingredient(ingredient("Cheese")).unwrap();

        let updated = catalog
            .update_ingredient(
                cheese.id_typed(),
                IngredientDraft {
                    name: "Mozzarella".to_string(),
                    unit: "g".to_string(),
                    cost_per_unit: Some(dec!(0.03)),
                    active: false,
                },
            )
            .unwrap();

        assert_eq!(catalog.get_ingredient(cheese.id_typed()).unwrap(), updated);
        assert_eq!(updated.unit(), "g");
        assert!(!updated.is_active());
    }

    #[test]
    fn update_allows_recasing_own_name_but_not_taking_anothers() {
        let (catalog, _) = setup();
        let mains = catalog.create_category(category("Mains")).unwrap();
        catalog.create_category(category("Sides")).unwrap();

        let renamed = catalog
            .update_category(mains.id_typed(), category("MAINS"))
            .unwrap();
        assert_eq!(renamed.name(), "MAINS");

        let err = catalog
            .update_category(mains.id_typed(), category("sides"))
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateName(_)));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (catalog, _) = setup();
        assert!(matches!(
            catalog.get_ingredient(IngredientId::new()),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            catalog.update_category(CategoryId::new(), category("X")),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            catalog.deactivate_menu_item(MenuItemId::new()),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn deactivate_is_idempotent() {
        let (catalog, _) = setup();
        let cheese = catalog.create_ingredient(ingredient("Cheese")).unwrap();

        let first = catalog.deactivate_ingredient(cheese.id_typed()).unwrap();
        let second = catalog.deactivate_ingredient(cheese.id_typed()).unwrap();
        assert!(!first.is_active());
        assert!(!second.is_active());
    }

    #[test]
    fn activation_requires_recipe_lines() {
        let (catalog, recipes) = setup();
        let burger = catalog.create_menu_item(menu_item("Burger")).unwrap();
        let cheese = catalog.create_ingredient(ingredient("Cheese")).unwrap();
        let activate = MenuItemDraft { active: true, ..menu_item("Burger") };

        let err = catalog
            .update_menu_item(burger.id_typed(), activate.clone())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_value("cannot activate menu item without recipe ingredients")
        );

        recipes
            .add_line(burger.id_typed(), cheese.id_typed(), Some(dec!(2)))
            .unwrap();
        let active = catalog.update_menu_item(burger.id_typed(), activate).unwrap();
        assert!(active.is_active());
    }

    #[test]
    fn inactive_category_cannot_be_attached_until_reactivated() {
        let (catalog, _) = setup();
        let burger = catalog.create_menu_item(menu_item("Burger")).unwrap();
        let mains = catalog.create_category(category("Mains")).unwrap();
        catalog.deactivate_category(mains.id_typed()).unwrap();

        let attach = MenuItemDraft {
            categories: Some(BTreeSet::from([mains.id_typed()])),
            ..menu_item("Burger")
        };
        let err = catalog
            .update_menu_item(burger.id_typed(), attach.clone())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));

        catalog
            .update_category(mains.id_typed(), category("Mains"))
            .unwrap();
        catalog.update_menu_item(burger.id_typed(), attach).unwrap();

        let categories = catalog.categories_of_menu_item(burger.id_typed()).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id_typed(), mains.id_typed());
    }

    #[test]
    fn unknown_category_is_not_found() {
        let (catalog, _) = setup();
        let err = catalog
            .create_menu_item(MenuItemDraft {
                categories: Some(BTreeSet::from([CategoryId::new()])),
                ..menu_item("Burger")
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(catalog.list_menu_items().unwrap().is_empty());
    }

    #[test]
    fn rejected_update_persists_nothing() {
        let (catalog, _) = setup();
        let burger = catalog.create_menu_item(menu_item("Burger")).unwrap();
        let vegan = catalog.create_category(category("Vegan")).unwrap();
        catalog.deactivate_category(vegan.id_typed()).unwrap();

        let err = catalog
            .update_menu_item(
                burger.id_typed(),
                MenuItemDraft {
                    name: "Veggie Burger".to_string(),
                    selling_price: Some(dec!(99)),
                    categories: Some(BTreeSet::from([vegan.id_typed()])),
                    ..menu_item("Burger")
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue(_)));

        let stored = catalog.get_menu_item(burger.id_typed()).unwrap();
        assert_eq!(stored, burger);
    }

    #[test]
    fn association_is_visible_from_both_sides() {
        let (catalog, _) = setup();
        let mains = catalog.create_category(category("Mains")).unwrap();
        let grill = catalog.create_category(category("Grill")).unwrap();
        let burger = catalog
            .create_menu_item(MenuItemDraft {
                categories: Some(BTreeSet::from([mains.id_typed(), grill.id_typed()])),
                ..menu_item("Burger")
            })
            .unwrap();
        let salad = catalog
            .create_menu_item(MenuItemDraft {
                categories: Some(BTreeSet::from([mains.id_typed()])),
                ..menu_item("Salad")
            })
            .unwrap();

        let in_mains: Vec<_> = catalog
            .menu_items_in_category(mains.id_typed())
            .unwrap()
            .iter()
            .map(MenuItem::id_typed)
            .collect();
        assert_eq!(in_mains, vec![burger.id_typed(), salad.id_typed()]);

        // Replacing the burger's set drops it from "Mains" only.
        catalog
            .update_menu_item(
                burger.id_typed(),
                MenuItemDraft {
                    categories: Some(BTreeSet::from([grill.id_typed()])),
                    ..menu_item("Burger")
                },
            )
            .unwrap();
        let in_mains = catalog.menu_items_in_category(mains.id_typed()).unwrap();
        assert_eq!(in_mains, vec![salad.clone()]);
        assert_eq!(catalog.menu_items_in_category(grill.id_typed()).unwrap().len(), 1);
    }

    #[test]
    fn list_active_menu_items_skips_inactive() {
        let (catalog, _) = setup();
        let mains = catalog.create_category(category("Mains")).unwrap();
        let burger = catalog
            .create_menu_item(MenuItemDraft {
                categories: Some(BTreeSet::from([mains.id_typed()])),
                ..menu_item("Burger")
            })
            .unwrap();
        let soup = catalog.create_menu_item(menu_item("Soup")).unwrap();
        catalog.deactivate_menu_item(soup.id_typed()).unwrap();

        let active = catalog.list_active_menu_items().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].item, burger);
        assert_eq!(active[0].category_ids, BTreeSet::from([mains.id_typed()]));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn flip_case(name: &str) -> String {
            name.chars()
                .map(|c| {
                    if c.is_ascii_lowercase() {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: names differing only by case collide for every catalog kind.
            #[test]
            fn case_variants_are_duplicates(name in "[A-Za-z][A-Za-z0-9 ]{0,30}") {
                let (catalog, _) = setup();
                let variant = flip_case(&name);

                catalog.create_ingredient(ingredient(&name)).unwrap();
                let err = catalog.create_ingredient(ingredient(&variant)).unwrap_err();
                prop_assert!(matches!(err, DomainError::DuplicateName(_)));

                catalog.create_category(category(&name)).unwrap();
                let err = catalog.create_category(category(&variant)).unwrap_err();
                prop_assert!(matches!(err, DomainError::DuplicateName(_)));

                catalog.create_menu_item(menu_item(&name)).unwrap();
                let err = catalog.create_menu_item(menu_item(&variant)).unwrap_err();
                prop_assert!(matches!(err, DomainError::DuplicateName(_)));
            }
        }
    }
}
