//! Recipe domain module.
//!
//! A recipe is the ordered list of lines attached to a menu item. Each line
//! names one ingredient and the quantity it needs. The same ingredient may
//! appear on several lines of one recipe; such lines are kept separate and
//! add up, they are never merged.

pub mod recipe_line;

pub use recipe_line::{total_quantity, RecipeIngredient};
