//! Profit domain module.
//!
//! Pure cost/margin arithmetic plus the immutable calculation record. The
//! margin is expressed as a **percentage of the selling price**:
//!
//! ```text
//! margin = round_half_up((selling_price - total_cost) / selling_price, scale) * 100
//! ```
//!
//! With the default ratio scale of 4 this yields percentages with two decimal
//! places (e.g. `37.50`). A recipe costing more than the price gives a negative
//! margin.

pub mod calculation;

pub use calculation::{
    compute_breakdown, CostLine, ProfitBreakdown, ProfitCalculationRecord, DEFAULT_MARGIN_SCALE,
    MAX_MARGIN_SCALE,
};
