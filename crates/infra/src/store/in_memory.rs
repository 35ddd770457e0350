use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;

use menuprofit_catalog::MenuItem;
use menuprofit_core::{
    name_key, CalculationId, CatalogEntity, CategoryId, Entity, IngredientId, MenuItemId,
    RecipeLineId,
};
use menuprofit_profit::ProfitCalculationRecord;
use menuprofit_recipes::{total_quantity, RecipeIngredient};

use super::r#trait::{
    CalculationStore, CatalogStore, MenuItemStore, RecipeLineStore, StoreError, StoreResult,
};

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
}

/// Insert or replace `entity` by id, keeping insertion order and enforcing
/// case-insensitive name uniqueness against every other row.
fn upsert_unique<E>(rows: &mut Vec<E>, entity: E) -> StoreResult<E>
where
    E: CatalogEntity + Clone,
{
    let key = entity.name_key();
    if rows
        .iter()
        .any(|row| row.id() != entity.id() && row.name_key() == key)
    {
        return Err(StoreError::UniqueViolation(format!(
            "{} with name '{}' already exists",
            E::KIND,
            entity.name()
        )));
    }

    match rows.iter_mut().find(|row| row.id() == entity.id()) {
        Some(slot) => *slot = entity.clone(),
        None => rows.push(entity.clone()),
    }
    Ok(entity)
}

fn find_by_name<E>(rows: &[E], name: &str) -> Option<E>
where
    E: CatalogEntity + Clone,
{
    let key = name_key(name);
    rows.iter().find(|row| row.name_key() == key).cloned()
}

/// In-memory catalog table for tests/dev (ingredients, categories).
#[derive(Debug)]
pub struct InMemoryCatalogStore<E> {
    rows: RwLock<Vec<E>>,
}

impl<E> InMemoryCatalogStore<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<E> Default for InMemoryCatalogStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> CatalogStore<E> for InMemoryCatalogStore<E>
where
    E: CatalogEntity + Clone + Send + Sync,
{
    fn save(&self, entity: E) -> StoreResult<E> {
        let mut rows = write(&self.rows)?;
        upsert_unique(&mut rows, entity)
    }

    fn find_by_id(&self, id: E::Id) -> StoreResult<Option<E>> {
        let rows = read(&self.rows)?;
        Ok(rows.iter().find(|row| *row.id() == id).cloned())
    }

    fn find_by_name_ignore_case(&self, name: &str) -> StoreResult<Option<E>> {
        let rows = read(&self.rows)?;
        Ok(find_by_name(&rows, name))
    }

    fn find_all(&self) -> StoreResult<Vec<E>> {
        Ok(read(&self.rows)?.clone())
    }
}

#[derive(Debug, Default)]
struct MenuTables {
    items: Vec<MenuItem>,
    assignments: BTreeSet<(MenuItemId, CategoryId)>,
}

/// In-memory menu item table plus its category association, behind one lock
/// so an item and its categories always change together.
#[derive(Debug, Default)]
pub struct InMemoryMenuItemStore {
    tables: RwLock<MenuTables>,
}

impl InMemoryMenuItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore<MenuItem> for InMemoryMenuItemStore {
    fn save(&self, item: MenuItem) -> StoreResult<MenuItem> {
        self.save_with_categories(item, None)
    }

    fn find_by_id(&self, id: MenuItemId) -> StoreResult<Option<MenuItem>> {
        let tables = read(&self.tables)?;
        Ok(tables.items.iter().find(|item| item.id_typed() == id).cloned())
    }

    fn find_by_name_ignore_case(&self, name: &str) -> StoreResult<Option<MenuItem>> {
        let tables = read(&self.tables)?;
        Ok(find_by_name(&tables.items, name))
    }

    fn find_all(&self) -> StoreResult<Vec<MenuItem>> {
        Ok(read(&self.tables)?.items.clone())
    }
}

impl MenuItemStore for InMemoryMenuItemStore {
    fn save_with_categories(
        &self,
        item: MenuItem,
        categories: Option<BTreeSet<CategoryId>>,
    ) -> StoreResult<MenuItem> {
        let mut tables = write(&self.tables)?;
        let id = item.id_typed();
        let saved = upsert_unique(&mut tables.items, item)?;

        if let Some(categories) = categories {
            tables.assignments.retain(|(item_id, _)| *item_id != id);
            tables
                .assignments
                .extend(categories.into_iter().map(|category_id| (id, category_id)));
        }
        Ok(saved)
    }

    fn category_ids_of(&self, menu_item_id: MenuItemId) -> StoreResult<BTreeSet<CategoryId>> {
        let tables = read(&self.tables)?;
        Ok(tables
            .assignments
            .iter()
            .filter(|(item_id, _)| *item_id == menu_item_id)
            .map(|(_, category_id)| *category_id)
            .collect())
    }

    fn menu_item_ids_in(&self, category_id: CategoryId) -> StoreResult<Vec<MenuItemId>> {
        let tables = read(&self.tables)?;
        // Item insertion order, not association order.
        Ok(tables
            .items
            .iter()
            .map(MenuItem::id_typed)
            .filter(|id| tables.assignments.contains(&(*id, category_id)))
            .collect())
    }
}

/// In-memory recipe line table (insertion-ordered).
#[derive(Debug, Default)]
pub struct InMemoryRecipeLineStore {
    lines: RwLock<Vec<RecipeIngredient>>,
}

impl InMemoryRecipeLineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecipeLineStore for InMemoryRecipeLineStore {
    fn save(&self, line: RecipeIngredient) -> StoreResult<RecipeIngredient> {
        let mut lines = write(&self.lines)?;
        match lines.iter_mut().find(|l| l.id_typed() == line.id_typed()) {
            Some(slot) => *slot = line.clone(),
            None => lines.push(line.clone()),
        }
        Ok(line)
    }

    fn find_by_id(&self, id: RecipeLineId) -> StoreResult<Option<RecipeIngredient>> {
        let lines = read(&self.lines)?;
        Ok(lines.iter().find(|l| l.id_typed() == id).cloned())
    }

    fn delete(&self, id: RecipeLineId) -> StoreResult<bool> {
        let mut lines = write(&self.lines)?;
        let before = lines.len();
        lines.retain(|l| l.id_typed() != id);
        Ok(lines.len() != before)
    }

    fn find_by_menu_item_id(&self, menu_item_id: MenuItemId) -> StoreResult<Vec<RecipeIngredient>> {
        let lines = read(&self.lines)?;
        Ok(lines
            .iter()
            .filter(|l| l.menu_item_id() == menu_item_id)
            .cloned()
            .collect())
    }

    fn find_by_ingredient_id(&self, ingredient_id: IngredientId) -> StoreResult<Vec<RecipeIngredient>> {
        let lines = read(&self.lines)?;
        Ok(lines
            .iter()
            .filter(|l| l.ingredient_id() == ingredient_id)
            .cloned()
            .collect())
    }

    fn exists_by_menu_item_id(&self, menu_item_id: MenuItemId) -> StoreResult<bool> {
        let lines = read(&self.lines)?;
        Ok(lines.iter().any(|l| l.menu_item_id() == menu_item_id))
    }

    fn sum_quantity_by_ingredient_id(&self, ingredient_id: IngredientId) -> StoreResult<Decimal> {
        let lines = read(&self.lines)?;
        Ok(total_quantity(
            lines.iter().filter(|l| l.ingredient_id() == ingredient_id),
        ))
    }
}

/// In-memory append-only calculation log.
#[derive(Debug, Default)]
pub struct InMemoryCalculationStore {
    records: RwLock<Vec<ProfitCalculationRecord>>,
}

impl InMemoryCalculationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(
        &self,
        keep: impl Fn(&ProfitCalculationRecord) -> bool,
    ) -> StoreResult<Vec<ProfitCalculationRecord>> {
        let records = read(&self.records)?;
        Ok(records.iter().filter(|r| keep(r)).cloned().collect())
    }
}

impl CalculationStore for InMemoryCalculationStore {
    fn append(&self, record: ProfitCalculationRecord) -> StoreResult<ProfitCalculationRecord> {
        let mut records = write(&self.records)?;
        if records.iter().any(|r| r.id_typed() == record.id_typed()) {
            return Err(StoreError::Conflict(format!(
                "calculation {} already recorded",
                record.id_typed()
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: CalculationId) -> StoreResult<Option<ProfitCalculationRecord>> {
        let records = read(&self.records)?;
        Ok(records.iter().find(|r| r.id_typed() == id).cloned())
    }

    fn find_by_menu_item_id(
        &self,
        menu_item_id: MenuItemId,
    ) -> StoreResult<Vec<ProfitCalculationRecord>> {
        self.filtered(|r| r.menu_item_id() == menu_item_id)
    }

    fn find_all(&self) -> StoreResult<Vec<ProfitCalculationRecord>> {
        Ok(read(&self.records)?.clone())
    }

    fn find_by_profit_margin_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> StoreResult<Vec<ProfitCalculationRecord>> {
        self.filtered(|r| r.margin_within(min, max))
    }

    fn find_by_profit_margin_at_least(&self, min: Decimal) -> StoreResult<Vec<ProfitCalculationRecord>> {
        self.filtered(|r| r.profit_margin() >= min)
    }
}
