use rust_decimal::Decimal;
use serde::Serialize;

use shopkeep_core::{DomainError, DomainResult, Entity};

/// A product held in stock.
///
/// `quantity` is unsigned, so stock on hand can never be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    name: String,
    price: Decimal,
    quantity: u64,
}

impl Product {
    /// Create a product.
    ///
    /// Rejects a blank name or a negative price.
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u64) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "price cannot be negative (got {price})"
            )));
        }
        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Check whether `requested_quantity` units can be taken from stock.
    pub fn is_available(&self, requested_quantity: u64) -> bool {
        requested_quantity <= self.quantity
    }

    /// Price of `quantity` units at the current unit price.
    ///
    /// Fails with `Validation` if the amount exceeds the decimal range.
    pub fn line_total(&self, quantity: u64) -> DomainResult<Decimal> {
        self.price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "line total for {quantity} x {} overflows",
                    self.name
                ))
            })
    }

    /// Copy of this product with a different stock level.
    ///
    /// Products handed out by an inventory are snapshots, so this never
    /// changes stock held anywhere else.
    pub fn with_quantity(&self, quantity: u64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
