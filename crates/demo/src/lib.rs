//! Demo storefront: stocks a small inventory, places one order and reports
//! the result.

pub mod config;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use rust_decimal::{Decimal, RoundingStrategy};

use shopkeep_inventory::Inventory;
use shopkeep_products::Product;
use shopkeep_sales::{DiscountPolicy, Order, Receipt};

pub use config::DemoConfig;

/// Inventory with the demo catalogue: laptops, mice and keyboards.
pub fn demo_inventory() -> anyhow::Result<Arc<Inventory>> {
    let inventory = Inventory::new();
    for (name, cents, quantity) in [
        ("Laptop", 999_99, 10),
        ("Mouse", 29_99, 50),
        ("Keyboard", 79_99, 30),
    ] {
        let product = Product::new(name, Decimal::new(cents, 2), quantity)
            .with_context(|| format!("building product {name}"))?;
        inventory.add_product(product);
    }
    Ok(Arc::new(inventory))
}

/// Format an amount as dollars rounded half-up to cents.
pub fn format_dollars(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${cents:.2}")
}

/// Order two laptops and three mice, write the summary to `out`, and return
/// the placed order's receipt.
pub fn run<W: Write>(policy: DiscountPolicy, out: &mut W) -> anyhow::Result<Receipt> {
    let inventory = demo_inventory()?;

    let mut order = Order::with_policy(Arc::clone(&inventory), policy);
    order.add_item("Laptop", 2).context("adding laptops")?;
    order.add_item("Mouse", 3).context("adding mice")?;

    let total = order.calculate_total()?;
    writeln!(out, "Order total: {}", format_dollars(total))?;

    order.place_order().context("placing order")?;

    let laptops = inventory
        .get_product("Laptop")
        .map(|p| p.quantity())
        .context("laptop missing from inventory")?;
    writeln!(out, "Laptops remaining: {laptops}")?;

    let receipt = order.receipt()?;
    writeln!(out, "{}", serde_json::to_string_pretty(&receipt)?)?;
    tracing::info!(order_id = %receipt.order_id, total = %receipt.totals.total, "demo order complete");
    Ok(receipt)
}
