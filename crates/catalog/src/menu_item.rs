use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use menuprofit_core::{CatalogEntity, CategoryId, DomainError, DomainResult, Entity, MenuItemId, Money};

use crate::{optional_text, required_text};

/// Input for creating or fully replacing a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub selling_price: Option<Decimal>,
    #[serde(default)]
    pub active: bool,
    /// `Some` replaces the category association wholesale; `None` leaves it as is.
    #[serde(default)]
    pub categories: Option<BTreeSet<CategoryId>>,
}

/// A sellable dish. Its recipe lines and categories live in separate tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    id: MenuItemId,
    name: String,
    description: Option<String>,
    selling_price: Money,
    active: bool,
}

impl MenuItem {
    /// Build a new, active menu item from a draft.
    ///
    /// New items start active even without a recipe; the recipe requirement
    /// only gates later activations through [`MenuItem::revise`].
    pub fn create(id: MenuItemId, draft: &MenuItemDraft) -> DomainResult<Self> {
        let mut item = Self::from_draft(id, draft)?;
        item.active = true;
        Ok(item)
    }

    /// Full replace of every mutable field.
    ///
    /// An item may only be revised into the active state when it has at least
    /// one recipe line.
    pub fn revise(&self, draft: &MenuItemDraft, has_recipe_lines: bool) -> DomainResult<Self> {
        if draft.active && !has_recipe_lines {
            return Err(DomainError::invalid_value(
                "cannot activate menu item without recipe ingredients",
            ));
        }
        Self::from_draft(self.id, draft)
    }

    fn from_draft(id: MenuItemId, draft: &MenuItemDraft) -> DomainResult<Self> {
        let selling_price = Money::try_new(draft.selling_price, "selling price")?;
        Ok(Self {
            id,
            name: required_text(&draft.name, "menu item name")?,
            description: optional_text(draft.description.as_deref()),
            selling_price,
            active: draft.active,
        })
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn id_typed(&self) -> MenuItemId {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn selling_price(&self) -> Money {
        self.selling_price
    }
}

impl Entity for MenuItem {
    type Id = MenuItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl CatalogEntity for MenuItem {
    const KIND: &'static str = "menu item";

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
