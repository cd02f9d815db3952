//! Response DTOs for metrics endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::metrics::{CustomTax, FinancialGoal, SalesMetrics};

/// Sales metrics as exposed to the surrounding UI.
#[derive(Debug, Serialize, Deserialize)]
pub struct SalesMetricsResponse {
    pub gross_total: Decimal,
    pub platform_fee_percentage: Decimal,
    pub expert_split_percentage: Decimal,
    pub team_split_percentage: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_gross_revenue: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_daily_average: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_projection_days: Option<i32>,

    pub custom_taxes: Vec<CustomTax>,
}

impl From<SalesMetrics> for SalesMetricsResponse {
    fn from(metrics: SalesMetrics) -> Self {
        Self {
            gross_total: metrics.gross_total,
            platform_fee_percentage: metrics.splits.platform_fee,
            expert_split_percentage: metrics.splits.expert_split,
            team_split_percentage: metrics.splits.team_split,
            manual_gross_revenue: metrics.manual_gross_revenue,
            manual_daily_average: metrics.manual_daily_average,
            manual_projection_days: metrics.manual_projection_days,
            custom_taxes: metrics.custom_taxes,
        }
    }
}

/// Financial goal progress as exposed to the surrounding UI.
#[derive(Debug, Serialize, Deserialize)]
pub struct FinancialGoalResponse {
    pub current: Decimal,
    pub target: Decimal,
    pub start_date: NaiveDate,
}

impl From<FinancialGoal> for FinancialGoalResponse {
    fn from(goal: FinancialGoal) -> Self {
        Self {
            current: goal.current,
            target: goal.target,
            start_date: goal.start_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn metrics_response_flattens_splits() {
        let metrics = SalesMetrics::compute(&[], None);
        let response = SalesMetricsResponse::from(metrics);

        assert_eq!(response.gross_total, dec!(0));
        assert_eq!(response.platform_fee_percentage, dec!(0.05));
        assert_eq!(response.expert_split_percentage, dec!(0.60));
        assert_eq!(response.team_split_percentage, dec!(0.40));
        assert!(response.custom_taxes.is_empty());
    }

    #[test]
    fn metrics_response_omits_absent_manual_figures() {
        let metrics = SalesMetrics::compute(&[], None);
        let json = serde_json::to_string(&SalesMetricsResponse::from(metrics)).unwrap();
        assert!(!json.contains("manual_gross_revenue"));
    }

    #[test]
    fn goal_response_carries_all_fields() {
        let goal = FinancialGoal::derive(dec!(42), None);
        let response = FinancialGoalResponse::from(goal);
        assert_eq!(response.current, dec!(42));
        assert_eq!(response.target, dec!(100000));
    }
}
