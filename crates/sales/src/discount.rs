//! Threshold-based discount tiers.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use shopkeep_core::{DomainError, DomainResult, ValueObject};

/// One discount tier: subtotals strictly greater than `threshold` are
/// multiplied by `factor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountTier {
    threshold: Decimal,
    factor: Decimal,
}

impl DiscountTier {
    /// `factor` must lie in `(0, 1]` and `threshold` must be non-negative.
    pub fn new(threshold: Decimal, factor: Decimal) -> DomainResult<Self> {
        if threshold < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "discount threshold cannot be negative (got {threshold})"
            )));
        }
        if factor <= Decimal::ZERO || factor > Decimal::ONE {
            return Err(DomainError::validation(format!(
                "discount factor must be in (0, 1] (got {factor})"
            )));
        }
        Ok(Self { threshold, factor })
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn factor(&self) -> Decimal {
        self.factor
    }

    /// Fraction taken off, e.g. `0.15` for a factor of `0.85`.
    pub fn rate(&self) -> Decimal {
        Decimal::ONE - self.factor
    }

    fn applies_to(&self, subtotal: Decimal) -> bool {
        subtotal > self.threshold
    }
}

impl ValueObject for DiscountTier {}

/// Ordered set of discount tiers. At most one tier applies: the one with the
/// highest threshold below the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountPolicy {
    tiers: Vec<DiscountTier>,
}

impl DiscountPolicy {
    pub fn new(mut tiers: Vec<DiscountTier>) -> Self {
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Self { tiers }
    }

    /// A policy that never discounts.
    pub fn none() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Tiers from highest to lowest threshold.
    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    pub fn tier_for(&self, subtotal: Decimal) -> Option<&DiscountTier> {
        self.tiers.iter().find(|tier| tier.applies_to(subtotal))
    }

    /// Multiplier applied to `subtotal`; `1` when no tier applies.
    pub fn factor_for(&self, subtotal: Decimal) -> Decimal {
        self.tier_for(subtotal)
            .map(DiscountTier::factor)
            .unwrap_or(Decimal::ONE)
    }

    pub fn apply(&self, subtotal: Decimal) -> Decimal {
        subtotal * self.factor_for(subtotal)
    }
}

impl Default for DiscountPolicy {
    /// Over 200.00: 15% off. Over 100.00: 10% off.
    fn default() -> Self {
        Self::new(vec![
            DiscountTier {
                threshold: Decimal::new(200_00, 2),
                factor: Decimal::new(85, 2),
            },
            DiscountTier {
                threshold: Decimal::new(100_00, 2),
                factor: Decimal::new(90, 2),
            },
        ])
    }
}

impl ValueObject for DiscountPolicy {}

/// Parses `"threshold:factor"` pairs separated by commas, e.g.
/// `"200:0.85,100:0.90"`. A blank string yields a policy with no tiers.
impl FromStr for DiscountPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tiers = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (threshold, factor) = entry.split_once(':').ok_or_else(|| {
                DomainError::validation(format!("discount tier must be threshold:factor (got {entry:?})"))
            })?;
            tiers.push(DiscountTier::new(
                parse_decimal(threshold, "threshold")?,
                parse_decimal(factor, "factor")?,
            )?);
        }
        Ok(Self::new(tiers))
    }
}

fn parse_decimal(raw: &str, field: &str) -> DomainResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| DomainError::validation(format!("invalid discount {field} {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn default_policy_boundaries_are_strict() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.apply(money("100.00")), money("100.00"));
        assert_eq!(policy.apply(money("100.01")), money("90.009"));
        assert_eq!(policy.apply(money("200.00")), money("180.00"));
        assert_eq!(policy.apply(money("200.01")), money("170.0085"));
    }

    #[test]
    fn default_policy_leaves_small_orders_alone() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.factor_for(Decimal::ZERO), Decimal::ONE);
        assert_eq!(policy.factor_for(money("99.99")), Decimal::ONE);
        assert!(policy.tier_for(money("50")).is_none());
    }

    #[test]
    fn tier_rate_is_complement_of_factor() {
        let policy = DiscountPolicy::default();
        let tier = policy.tier_for(money("250")).unwrap();
        assert_eq!(tier.rate(), money("0.15"));
    }

    #[test]
    fn tiers_are_sorted_highest_first() {
        let policy = DiscountPolicy::new(vec![
            DiscountTier::new(money("50"), money("0.95")).unwrap(),
            DiscountTier::new(money("500"), money("0.80")).unwrap(),
        ]);
        assert_eq!(policy.tiers()[0].threshold(), money("500"));
        assert_eq!(policy.factor_for(money("600")), money("0.80"));
        assert_eq!(policy.factor_for(money("60")), money("0.95"));
    }

    #[test]
    fn none_never_discounts() {
        assert_eq!(DiscountPolicy::none().apply(money("10000")), money("10000"));
    }

    #[test]
    fn parse_round_trips_default() {
        let parsed: DiscountPolicy = "100:0.90, 200:0.85".parse().unwrap();
        assert_eq!(parsed, DiscountPolicy::default());
    }

    #[test]
    fn parse_blank_is_empty_policy() {
        let parsed: DiscountPolicy = "  ".parse().unwrap();
        assert!(parsed.tiers().is_empty());
    }

    #[test]
    fn parse_rejects_malformed_entries() {
        assert!(matches!(
            "200".parse::<DiscountPolicy>(),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            "abc:0.9".parse::<DiscountPolicy>(),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            "100:1.5".parse::<DiscountPolicy>(),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            "-5:0.9".parse::<DiscountPolicy>(),
            Err(DomainError::Validation(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the default policy never increases a subtotal and never
            /// takes off more than 15%.
            #[test]
            fn default_discount_is_bounded(cents in 0i64..100_000_000) {
                let subtotal = Decimal::new(cents, 2);
                let total = DiscountPolicy::default().apply(subtotal);
                prop_assert!(total <= subtotal);
                prop_assert!(total >= subtotal * money("0.85"));
            }
        }
    }
}
