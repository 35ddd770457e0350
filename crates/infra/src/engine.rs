//! Service wiring: one handle exposing the catalog, recipe, profit and query
//! operations over a shared set of stores.

use crate::catalog_manager::CatalogManager;
use crate::config::EngineConfig;
use crate::profit_engine::ProfitEngine;
use crate::query_facade::QueryFacade;
use crate::recipe_composer::RecipeComposer;
use crate::store::Stores;

#[derive(Debug, Clone)]
pub struct MenuProfitEngine {
    catalog: CatalogManager,
    recipes: RecipeComposer,
    profit: ProfitEngine,
    queries: QueryFacade,
}

impl MenuProfitEngine {
    pub fn new(stores: Stores, config: EngineConfig) -> Self {
        let recipes = RecipeComposer::new(stores.clone());
        Self {
            catalog: CatalogManager::new(stores.clone(), recipes.clone()),
            profit: ProfitEngine::new(stores.clone(), recipes.clone(), config.margin_scale),
            queries: QueryFacade::new(stores),
            recipes,
        }
    }

    /// Engine over fresh in-memory stores.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(Stores::in_memory(), config)
    }

    pub fn catalog(&self) -> &CatalogManager {
        &self.catalog
    }

    pub fn recipes(&self) -> &RecipeComposer {
        &self.recipes
    }

    pub fn profit(&self) -> &ProfitEngine {
        &self.profit
    }

    pub fn queries(&self) -> &QueryFacade {
        &self.queries
    }
}
