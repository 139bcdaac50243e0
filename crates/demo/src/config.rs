//! Environment-driven configuration for the demo binary.

use anyhow::Context;

use shopkeep_observability::LogFormat;
use shopkeep_sales::DiscountPolicy;

pub const LOG_FORMAT_VAR: &str = "SHOPKEEP_LOG_FORMAT";
pub const DISCOUNT_TIERS_VAR: &str = "SHOPKEEP_DISCOUNT_TIERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub log_format: LogFormat,
    pub discount_policy: DiscountPolicy,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            discount_policy: DiscountPolicy::default(),
        }
    }
}

impl DemoConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?;
        }

        if let Some(raw) = lookup(DISCOUNT_TIERS_VAR) {
            config.discount_policy = raw
                .parse::<DiscountPolicy>()
                .with_context(|| format!("invalid {DISCOUNT_TIERS_VAR}"))?;
        }

        Ok(config)
    }
}
