use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use menuprofit_core::{CatalogEntity, DomainResult, Entity, IngredientId, Money};

use crate::required_text;

/// Input for creating or fully replacing an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    pub unit: String,
    pub cost_per_unit: Option<Decimal>,
    /// Ignored on create (new ingredients always start active).
    #[serde(default)]
    pub active: bool,
}

/// A purchasable ingredient priced per unit of measure.
///
/// Ingredients are never deleted, only deactivated, so recipe lines that
/// reference them stay resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    id: IngredientId,
    name: String,
    unit: String,
    cost_per_unit: Money,
    active: bool,
}

impl Ingredient {
    /// Build a new, active ingredient from a draft.
    pub fn create(id: IngredientId, draft: &IngredientDraft) -> DomainResult<Self> {
        let mut ingredient = Self::from_draft(id, draft)?;
        ingredient.active = true;
        Ok(ingredient)
    }

    /// Full replace of every mutable field, including the active flag.
    ///
    /// Returns the revised entity; `self` is left untouched on error.
    pub fn revise(&self, draft: &IngredientDraft) -> DomainResult<Self> {
        Self::from_draft(self.id, draft)
    }

    fn from_draft(id: IngredientId, draft: &IngredientDraft) -> DomainResult<Self> {
        let cost_per_unit = Money::try_new(draft.cost_per_unit, "cost per unit")?;
        Ok(Self {
            id,
            name: required_text(&draft.name, "ingredient name")?,
            unit: required_text(&draft.unit, "unit")?,
            cost_per_unit,
            active: draft.active,
        })
    }

    /// Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn id_typed(&self) -> IngredientId {
        self.id
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn cost_per_unit(&self) -> Money {
        self.cost_per_unit
    }
}

impl Entity for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl CatalogEntity for Ingredient {
    const KIND: &'static str = "ingredient";

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
