//! Application layer: entity stores, configuration and the services that
//! enforce cross-entity rules (catalog, recipes, profit, queries).
//!
//! Services are synchronous and hold their stores behind `Arc`, so an engine
//! can be cloned and shared across threads.

pub mod catalog_manager;
pub mod config;
pub mod engine;
pub mod profit_engine;
pub mod query_facade;
pub mod recipe_composer;
pub mod store;


pub use catalog_manager::{CatalogManager, MenuItemWithCategories};
pub use config::EngineConfig;
pub use engine::MenuProfitEngine;
pub use profit_engine::ProfitEngine;
pub use query_facade::QueryFacade;
pub use recipe_composer::RecipeComposer;
pub use store::{StoreError, Stores};
