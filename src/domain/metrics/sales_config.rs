//! Tenant sales configuration.
//!
//! Operator-managed figures that shape the metrics aggregation: manual
//! overrides of ledger-derived totals, fee-split percentages, custom
//! taxes, and the financial goal. Zero or one config exists per tenant
//! and it is a read-only input to this engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default platform fee share (5%).
pub const DEFAULT_PLATFORM_FEE: Decimal = dec!(0.05);

/// Default expert split share (60%).
pub const DEFAULT_EXPERT_SPLIT: Decimal = dec!(0.60);

/// Default team split share (40%).
pub const DEFAULT_TEAM_SPLIT: Decimal = dec!(0.40);

/// An operator-defined tax line applied on top of the splits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTax {
    /// Display label, e.g. "ISS" or "municipal".
    pub label: String,

    /// Tax rate as a fraction of gross.
    pub percentage: Decimal,
}

/// Per-tenant sales configuration.
///
/// The split fields are kept as the operator entered them: the back
/// office stores free-form text, so a value may be absent or not a
/// number at all. Coercion happens in [`SplitRates::from_config`], which
/// falls back to the default per field instead of failing the whole
/// metrics computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesConfig {
    /// Manual override of gross revenue. An explicit zero is a valid
    /// override, distinct from absent.
    pub manual_gross_revenue: Option<Decimal>,

    /// Manual override of the daily average figure.
    pub manual_daily_average: Option<Decimal>,

    /// Manual override of the projection window in days.
    pub manual_projection_days: Option<i32>,

    /// Platform fee share, operator-entered text.
    pub platform_fee_percentage: Option<String>,

    /// Expert split share, operator-entered text.
    pub expert_split_percentage: Option<String>,

    /// Team split share, operator-entered text.
    pub team_split_percentage: Option<String>,

    /// Ordered custom tax lines, passed through to the metrics verbatim.
    pub custom_taxes: Vec<CustomTax>,

    /// Financial goal target.
    pub financial_goal_target: Option<Decimal>,

    /// Financial goal tracking start date.
    pub financial_goal_start_date: Option<NaiveDate>,
}

/// The three fee-split rates used by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRates {
    pub platform_fee: Decimal,
    pub expert_split: Decimal,
    pub team_split: Decimal,
}

impl Default for SplitRates {
    fn default() -> Self {
        Self {
            platform_fee: DEFAULT_PLATFORM_FEE,
            expert_split: DEFAULT_EXPERT_SPLIT,
            team_split: DEFAULT_TEAM_SPLIT,
        }
    }
}

impl SplitRates {
    /// Coerces operator-entered split fields, falling back to the default
    /// for any field that is absent or not numeric. A bad field never
    /// fails the computation.
    pub fn from_config(config: &SalesConfig) -> Self {
        Self {
            platform_fee: coerce(&config.platform_fee_percentage, DEFAULT_PLATFORM_FEE),
            expert_split: coerce(&config.expert_split_percentage, DEFAULT_EXPERT_SPLIT),
            team_split: coerce(&config.team_split_percentage, DEFAULT_TEAM_SPLIT),
        }
    }
}

fn coerce(raw: &Option<String>, default: Decimal) -> Decimal {
    raw.as_deref()
        .and_then(|s| Decimal::from_str(s.trim()).ok())
        .unwrap_or(default)
}
