use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use menuprofit_core::{DomainResult, Entity, IngredientId, MenuItemId, Quantity, RecipeLineId};

/// One recipe line: `quantity` units of an ingredient for a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    id: RecipeLineId,
    menu_item_id: MenuItemId,
    ingredient_id: IngredientId,
    quantity: Quantity,
}

impl RecipeIngredient {
    /// Build a new line. A missing or non-positive quantity is rejected.
    pub fn new(
        id: RecipeLineId,
        menu_item_id: MenuItemId,
        ingredient_id: IngredientId,
        quantity: Option<Decimal>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            menu_item_id,
            ingredient_id,
            quantity: Quantity::try_new(quantity)?,
        })
    }

    /// Same line with a new quantity.
    pub fn with_quantity(&self, quantity: Decimal) -> DomainResult<Self> {
        Ok(Self {
            quantity: Quantity::try_new(Some(quantity))?,
            ..self.clone()
        })
    }

    pub fn id_typed(&self) -> RecipeLineId {
        self.id
    }

    pub fn menu_item_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    pub fn ingredient_id(&self) -> IngredientId {
        self.ingredient_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

impl Entity for RecipeIngredient {
    type Id = RecipeLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Sum of quantities over `lines`; zero for an empty iterator.
pub fn total_quantity<'a>(lines: impl IntoIterator<Item = &'a RecipeIngredient>) -> Decimal {
    lines
        .into_iter()
        .map(|line| line.quantity.value())
        .fold(Decimal::ZERO, |acc, q| acc + q)
}
