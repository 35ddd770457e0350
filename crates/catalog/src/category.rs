use serde::{Deserialize, Serialize};

use menuprofit_core::{CatalogEntity, CategoryId, DomainError, DomainResult, Entity};

use crate::{optional_text, required_text};

/// Input for creating or fully replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// A menu grouping ("Burgers", "Vegan", ...).
///
/// The menu items in a category are not stored here; they are looked up from
/// the menu-item/category association owned by the menu item store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: Option<String>,
    active: bool,
}

impl Category {
    pub fn create(id: CategoryId, draft: &CategoryDraft) -> DomainResult<Self> {
        let mut category = Self::from_draft(id, draft)?;
        category.active = true;
        Ok(category)
    }

    pub fn revise(&self, draft: &CategoryDraft) -> DomainResult<Self> {
        Self::from_draft(self.id, draft)
    }

    fn from_draft(id: CategoryId, draft: &CategoryDraft) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: required_text(&draft.name, "category name")?,
            description: optional_text(draft.description.as_deref()),
            active: draft.active,
        })
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Only active categories may be attached to a menu item.
    pub fn ensure_assignable(&self) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::invalid_value(format!(
                "cannot assign inactive category '{}' to menu item",
                self.name
            )));
        }
        Ok(())
    }

    pub fn id_typed(&self) -> CategoryId {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl CatalogEntity for Category {
    const KIND: &'static str = "category";

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
