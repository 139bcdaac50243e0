//! Sales domain module.
//!
//! Customer orders drawn against an [`Inventory`](shopkeep_inventory::Inventory):
//! line items, discount tiers, totals and the all-or-nothing placement step.

pub mod discount;
pub mod order;

pub use discount::{DiscountPolicy, DiscountTier};
pub use order::{LineItem, Order, OrderStatus, OrderTotals, PricedLine, Receipt};
