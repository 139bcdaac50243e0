use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shopkeep_core::{DomainError, DomainResult};
use shopkeep_products::Product;

/// In-memory product inventory keyed by product name.
///
/// All stock changes go through [`Inventory::update_stock`] or
/// [`Inventory::commit_deductions`], both of which hold the write lock for the
/// whole check-and-apply, so concurrent deductions cannot oversell.
#[derive(Debug, Default)]
pub struct Inventory {
    products: RwLock<HashMap<String, Product>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations never panic while holding the lock, so a poisoned map is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a product. A product with the same name is replaced.
    pub fn add_product(&self, product: Product) {
        let name = product.name().to_string();
        let replaced = self.write().insert(name.clone(), product);
        if replaced.is_some() {
            tracing::debug!(product = %name, "replaced existing product");
        } else {
            tracing::debug!(product = %name, "added product");
        }
    }

    /// Snapshot of the product named `name`, if present.
    pub fn get_product(&self, name: &str) -> Option<Product> {
        self.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Product names in lexical order.
    pub fn product_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Sum of stock on hand across all products.
    pub fn total_units(&self) -> u64 {
        self.read()
            .values()
            .fold(0u64, |acc, p| acc.saturating_add(p.quantity()))
    }

    /// Apply a signed stock change and return the new quantity.
    ///
    /// Positive values restock, negative values sell. Fails with `NotFound`
    /// for an unknown product and `InsufficientStock` when the change would
    /// take stock below zero; on failure the quantity is unchanged.
    pub fn update_stock(&self, name: &str, quantity_change: i64) -> DomainResult<u64> {
        let mut products = self.write();
        let product = products
            .get_mut(name)
            .ok_or_else(|| DomainError::not_found(name))?;

        let result = if quantity_change >= 0 {
            restocked(product, quantity_change.unsigned_abs())
        } else {
            deducted(product, quantity_change.unsigned_abs())
        };

        match result {
            Ok(updated) => {
                let quantity = updated.quantity();
                *product = updated;
                tracing::debug!(product = %name, quantity_change, quantity, "stock updated");
                Ok(quantity)
            }
            Err(err) => {
                tracing::warn!(product = %name, quantity_change, error = %err, "stock update rejected");
                Err(err)
            }
        }
    }

    /// Deduct every `(name, quantity)` pair, or nothing at all.
    ///
    /// Quantities for the same product are summed before checking, and every
    /// product is checked before any stock is touched. The whole batch runs
    /// under one write lock.
    pub fn commit_deductions<'a, I>(&self, lines: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut demand: BTreeMap<&str, u64> = BTreeMap::new();
        for (name, quantity) in lines {
            let total = demand.entry(name).or_insert(0);
            *total = total.checked_add(quantity).ok_or_else(|| {
                DomainError::validation(format!("requested quantity for {name} overflows"))
            })?;
        }

        let mut products = self.write();

        let mut updates = Vec::with_capacity(demand.len());
        for (&name, &quantity) in &demand {
            let product = products
                .get(name)
                .ok_or_else(|| DomainError::not_found(name))
                .and_then(|product| deducted(product, quantity));
            match product {
                Ok(updated) => updates.push(updated),
                Err(err) => {
                    tracing::warn!(product = %name, quantity, error = %err, "batch deduction rejected");
                    return Err(err);
                }
            }
        }

        for updated in updates {
            tracing::debug!(product = %updated.name(), quantity = updated.quantity(), "stock deducted");
            products.insert(updated.name().to_string(), updated);
        }
        Ok(())
    }
}

fn restocked(product: &Product, amount: u64) -> DomainResult<Product> {
    let quantity = product.quantity().checked_add(amount).ok_or_else(|| {
        DomainError::validation(format!("stock for {} would overflow", product.name()))
    })?;
    Ok(product.with_quantity(quantity))
}

fn deducted(product: &Product, amount: u64) -> DomainResult<Product> {
    let quantity = product.quantity().checked_sub(amount).ok_or_else(|| {
        DomainError::insufficient_stock(product.name(), amount, product.quantity())
    })?;
    Ok(product.with_quantity(quantity))
}
