use anyhow::Context;
use rust_decimal::Decimal;

use menuprofit_catalog::{CategoryDraft, IngredientDraft, MenuItemDraft};
use menuprofit_infra::{EngineConfig, MenuProfitEngine};

fn main() -> anyhow::Result<()> {
    let config = EngineConfig::from_env()?;
    menuprofit_observability::init_with(config.log_format);

    let engine = MenuProfitEngine::in_memory(config);
    let catalog = engine.catalog();

    let mains = catalog.create_category(CategoryDraft {
        name: "Mains".to_string(),
        description: Some("Main courses".to_string()),
        active: true,
    })?;
    let cheese = catalog.create_ingredient(IngredientDraft {
        name: "Cheese".to_string(),
        unit: "slice".to_string(),
        cost_per_unit: Some(Decimal::new(500, 2)),
        active: true,
    })?;
    let burger_draft = MenuItemDraft {
        name: "Burger".to_string(),
        description: None,
        selling_price: Some(Decimal::new(2000, 2)),
        active: true,
        categories: Some([mains.id_typed()].into_iter().collect()),
    };
    let burger = catalog.create_menu_item(MenuItemDraft {
        active: false,
        ..burger_draft.clone()
    })?;

    engine
        .recipes()
        .add_line(burger.id_typed(), cheese.id_typed(), Some(Decimal::TWO))?;
    catalog
        .update_menu_item(burger.id_typed(), burger_draft)
        .context("activating burger")?;

    let record = engine.profit().calculate_profit(burger.id_typed())?;
    tracing::info!(
        menu_item = %burger.id_typed(),
        total_cost = %record.total_cost(),
        margin_percent = %record.profit_margin(),
        "demo calculation complete"
    );

    Ok(())
}
