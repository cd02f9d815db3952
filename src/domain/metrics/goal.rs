//! Financial goal tracking.
//!
//! Derives goal progress from the aggregated gross total and the
//! tenant's configured target. No state machine, no persistence;
//! recomputed on every read.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::sales_config::SalesConfig;

/// Default goal target when the tenant never configured one.
pub const DEFAULT_GOAL_TARGET: Decimal = dec!(100000);

/// Default tracking start date when the tenant never configured one.
pub static DEFAULT_GOAL_START_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixed date"));

/// Derived goal progress for one tenant. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialGoal {
    /// Current progress; equals the aggregated gross total.
    pub current: Decimal,

    /// Configured target, or the default.
    pub target: Decimal,

    /// Configured tracking start date, or the default.
    pub start_date: NaiveDate,
}

impl FinancialGoal {
    /// Derives goal progress from the gross total and config.
    pub fn derive(gross_total: Decimal, config: Option<&SalesConfig>) -> Self {
        Self {
            current: gross_total,
            target: config
                .and_then(|c| c.financial_goal_target)
                .unwrap_or(DEFAULT_GOAL_TARGET),
            start_date: config
                .and_then(|c| c.financial_goal_start_date)
                .unwrap_or(*DEFAULT_GOAL_START_DATE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_equals_gross_total() {
        let goal = FinancialGoal::derive(dec!(1234.56), None);
        assert_eq!(goal.current, dec!(1234.56));
    }

    #[test]
    fn absent_config_uses_defaults() {
        let goal = FinancialGoal::derive(dec!(0), None);
        assert_eq!(goal.target, dec!(100000));
        assert_eq!(goal.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn configured_target_and_start_date_win() {
        let config = SalesConfig {
            financial_goal_target: Some(dec!(250000)),
            financial_goal_start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..Default::default()
        };
        let goal = FinancialGoal::derive(dec!(10), Some(&config));
        assert_eq!(goal.target, dec!(250000));
        assert_eq!(goal.start_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn partially_configured_goal_mixes_defaults() {
        let config = SalesConfig {
            financial_goal_target: Some(dec!(50000)),
            ..Default::default()
        };
        let goal = FinancialGoal::derive(dec!(10), Some(&config));
        assert_eq!(goal.target, dec!(50000));
        assert_eq!(goal.start_date, *DEFAULT_GOAL_START_DATE);
    }
}
