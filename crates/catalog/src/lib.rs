//! Catalog domain module.
//!
//! Ingredients, categories and menu items, with the validation rules that apply
//! to a single entity (positive prices/costs, non-blank names, the activation
//! gate). Cross-entity rules such as name uniqueness are enforced by the
//! catalog manager in `menuprofit-infra`.

pub mod category;
pub mod ingredient;
pub mod menu_item;

pub use category::{Category, CategoryDraft};
pub use ingredient::{Ingredient, IngredientDraft};
pub use menu_item::{MenuItem, MenuItemDraft};

use menuprofit_core::{DomainError, DomainResult};

/// Trim a required text field, rejecting blank input.
pub(crate) fn required_text(value: &str, field: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_value(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Normalise an optional free-text field: blank becomes `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
