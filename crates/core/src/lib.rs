//! `menuprofit-core` provides domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the shared error model, and the positive-decimal value
//! objects used for prices, costs and quantities.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{name_key, CatalogEntity, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{CalculationId, CategoryId, IngredientId, MenuItemId, RecipeLineId};
pub use value_object::{Money, Quantity, ValueObject};
