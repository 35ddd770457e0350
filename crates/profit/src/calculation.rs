use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use menuprofit_core::{CalculationId, DomainError, DomainResult, Entity, MenuItemId, Money, Quantity};

/// Decimal places kept on the profit/price ratio before scaling to percent.
pub const DEFAULT_MARGIN_SCALE: u32 = 4;

/// Upper bound accepted for the ratio scale.
pub const MAX_MARGIN_SCALE: u32 = 10;

/// Priced recipe line: what one line contributes to the total cost.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CostLine {
    pub cost_per_unit: Money,
    pub quantity: Quantity,
}

impl CostLine {
    pub fn cost(&self) -> DomainResult<Decimal> {
        self.cost_per_unit
            .amount()
            .checked_mul(self.quantity.value())
            .ok_or_else(overflow)
    }
}

/// Result of costing a recipe against a selling price.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    pub total_cost: Decimal,
    /// Absolute profit (`selling_price - total_cost`). Informational only; the
    /// persisted margin is the percentage.
    pub profit: Decimal,
    /// Margin as a percentage of the selling price.
    pub margin_percent: Decimal,
}

fn overflow() -> DomainError {
    DomainError::invalid_value("profit calculation overflowed decimal range")
}

/// Cost a recipe and derive its margin.
///
/// Line costs are exact products summed without intermediate rounding; only
/// the final ratio is rounded (half away from zero) to `scale` places.
pub fn compute_breakdown(
    selling_price: Money,
    lines: &[CostLine],
    scale: u32,
) -> DomainResult<ProfitBreakdown> {
    if lines.is_empty() {
        return Err(DomainError::invalid_value(
            "cannot calculate profit for menu item without ingredients",
        ));
    }

    let mut total_cost = Decimal::ZERO;
    for line in lines {
        total_cost = total_cost.checked_add(line.cost()?).ok_or_else(overflow)?;
    }

    let price = selling_price.amount();
    let profit = price.checked_sub(total_cost).ok_or_else(overflow)?;
    let ratio = profit
        .checked_div(price)
        .ok_or_else(overflow)?
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let margin_percent = ratio.checked_mul(Decimal::ONE_HUNDRED).ok_or_else(overflow)?;

    Ok(ProfitBreakdown {
        total_cost,
        profit,
        margin_percent,
    })
}

/// One point in a menu item's profitability history.
///
/// Records are append-only: there are no mutators, and the timestamp is fixed
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitCalculationRecord {
    id: CalculationId,
    menu_item_id: MenuItemId,
    total_cost: Decimal,
    profit_margin: Decimal,
    calculated_at: DateTime<Utc>,
}

impl ProfitCalculationRecord {
    pub fn new(
        id: CalculationId,
        menu_item_id: MenuItemId,
        breakdown: &ProfitBreakdown,
        calculated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            menu_item_id,
            total_cost: breakdown.total_cost,
            profit_margin: breakdown.margin_percent,
            calculated_at,
        }
    }

    pub fn id_typed(&self) -> CalculationId {
        self.id
    }

    pub fn menu_item_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn profit_margin(&self) -> Decimal {
        self.profit_margin
    }

    pub fn calculated_at(&self) -> DateTime<Utc> {
        self.calculated_at
    }

    /// Inclusive range check; an inverted range matches nothing.
    pub fn margin_within(&self, min: Decimal, max: Decimal) -> bool {
        min <= self.profit_margin && self.profit_margin <= max
    }
}

impl Entity for ProfitCalculationRecord {
    type Id = CalculationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
