//! Value objects: equality by value, not identity.
//!
//! Prices, costs and recipe quantities are all exact decimals that must be
//! strictly positive. They are modelled as validated newtypes so that an
//! entity holding one can never carry a zero or negative amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two value objects
/// with the same attributes are equal. To "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

fn ensure_positive(value: Option<Decimal>, field: &str) -> DomainResult<Decimal> {
    match value {
        None => Err(DomainError::invalid_value(format!("{field} is required"))),
        Some(v) if v <= Decimal::ZERO => Err(DomainError::invalid_value(format!(
            "{field} must be greater than 0"
        ))),
        Some(v) => Ok(v),
    }
}

/// A strictly positive monetary amount (selling price, cost per unit).
///
/// No currency is attached; the whole catalog is assumed to share one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Validate an optional amount. `field` names the value in the error message.
    pub fn try_new(value: Option<Decimal>, field: &str) -> DomainResult<Self> {
        ensure_positive(value, field).map(Self)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl ValueObject for Money {}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(Some(value), "amount")
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A strictly positive recipe quantity, expressed in the ingredient's unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn try_new(value: Option<Decimal>) -> DomainResult<Self> {
        ensure_positive(value, "quantity").map(Self)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl ValueObject for Quantity {}

impl TryFrom<Decimal> for Quantity {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(Some(value))
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
