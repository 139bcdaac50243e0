use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopkeep_core::{DomainError, DomainResult, Entity, OrderId, ValueObject};
use shopkeep_inventory::Inventory;

use crate::discount::DiscountPolicy;

/// Order status lifecycle. `Placed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Placed,
}

/// Order line: product name and quantity. Prices are looked up at pricing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_name: String,
    pub quantity: u64,
}

impl ValueObject for LineItem {}

/// A line item priced against the inventory's current unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedLine {
    pub product_name: String,
    pub quantity: u64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl ValueObject for PricedLine {}

/// Pre-discount subtotal, discount taken, and the amount due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount_rate: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl ValueObject for OrderTotals {}

/// Serializable summary of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub placed_at: Option<DateTime<Utc>>,
    pub lines: Vec<PricedLine>,
    pub totals: OrderTotals,
}

/// A customer order drawn against one shared inventory.
///
/// `add_item` checks stock at the time of the call but reserves nothing;
/// `place_order` re-checks every line and deducts all of them or none.
#[derive(Debug)]
pub struct Order {
    id: OrderId,
    inventory: Arc<Inventory>,
    items: Vec<LineItem>,
    status: OrderStatus,
    policy: DiscountPolicy,
    placed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Open an empty order using the default discount tiers.
    pub fn new(inventory: Arc<Inventory>) -> Self {
        Self::with_policy(inventory, DiscountPolicy::default())
    }

    pub fn with_policy(inventory: Arc<Inventory>, policy: DiscountPolicy) -> Self {
        Self {
            id: OrderId::new(),
            inventory,
            items: Vec::new(),
            status: OrderStatus::Open,
            policy,
            placed_at: None,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, OrderStatus::Open)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    pub fn placed_at(&self) -> Option<DateTime<Utc>> {
        self.placed_at
    }

    fn ensure_open(&self, action: &str) -> DomainResult<()> {
        if !self.is_open() {
            return Err(DomainError::invariant(format!(
                "cannot {action} once the order is placed"
            )));
        }
        Ok(())
    }

    /// Append a line item if the product exists and currently has enough stock.
    ///
    /// On failure the order is unchanged.
    pub fn add_item(&mut self, product_name: &str, quantity: u64) -> DomainResult<()> {
        self.ensure_open("add items")?;

        let product = self
            .inventory
            .get_product(product_name)
            .ok_or_else(|| DomainError::not_found(product_name))?;

        if !product.is_available(quantity) {
            tracing::debug!(
                order_id = %self.id,
                product = %product_name,
                quantity,
                available = product.quantity(),
                "line item rejected"
            );
            return Err(DomainError::insufficient_stock(
                product_name,
                quantity,
                product.quantity(),
            ));
        }

        self.items.push(LineItem {
            product_name: product_name.to_string(),
            quantity,
        });
        tracing::debug!(order_id = %self.id, product = %product_name, quantity, "line item added");
        Ok(())
    }

    /// Price every line item at the inventory's current unit price.
    pub fn priced_lines(&self) -> DomainResult<Vec<PricedLine>> {
        self.items
            .iter()
            .map(|item| -> DomainResult<PricedLine> {
                let product = self
                    .inventory
                    .get_product(&item.product_name)
                    .ok_or_else(|| DomainError::not_found(item.product_name.as_str()))?;
                Ok(PricedLine {
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price: product.price(),
                    line_total: product.line_total(item.quantity)?,
                })
            })
            .collect()
    }

    /// Subtotal at current prices with the discount tier applied.
    pub fn totals(&self) -> DomainResult<OrderTotals> {
        self.totals_of(&self.priced_lines()?)
    }

    fn totals_of(&self, lines: &[PricedLine]) -> DomainResult<OrderTotals> {
        let subtotal = lines.iter().try_fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line.line_total)
                .ok_or_else(|| DomainError::validation("order subtotal overflows"))
        })?;
        // Discount factors are at most 1, so the total never exceeds the subtotal.
        let total = self.policy.apply(subtotal);
        Ok(OrderTotals {
            subtotal,
            discount_rate: Decimal::ONE - self.policy.factor_for(subtotal),
            discount: subtotal - total,
            total,
        })
    }

    /// Amount due after discount.
    pub fn calculate_total(&self) -> DomainResult<Decimal> {
        Ok(self.totals()?.total)
    }

    /// Deduct every line item from the inventory and mark the order placed.
    ///
    /// All-or-nothing: if any line is missing or short on stock, no stock is
    /// touched and the order stays open.
    pub fn place_order(&mut self) -> DomainResult<()> {
        self.ensure_open("place the order")?;
        if self.items.is_empty() {
            return Err(DomainError::validation("cannot place order without items"));
        }

        let lines = self
            .items
            .iter()
            .map(|item| (item.product_name.as_str(), item.quantity));
        if let Err(err) = self.inventory.commit_deductions(lines) {
            tracing::warn!(order_id = %self.id, error = %err, "order placement failed");
            return Err(err);
        }

        self.status = OrderStatus::Placed;
        self.placed_at = Some(Utc::now());
        tracing::info!(order_id = %self.id, lines = self.items.len(), "order placed");
        Ok(())
    }

    pub fn receipt(&self) -> DomainResult<Receipt> {
        let lines = self.priced_lines()?;
        Ok(Receipt {
            order_id: self.id,
            status: self.status,
            placed_at: self.placed_at,
            totals: self.totals_of(&lines)?,
            lines,
        })
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
