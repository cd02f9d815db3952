//! Metrics domain module.
//!
//! Aggregates the tenant's transaction ledger under its sales
//! configuration and derives goal progress. Everything here is pure and
//! side-effect free.

mod aggregator;
mod goal;
mod sales_config;
mod transaction;

pub use aggregator::SalesMetrics;
pub use goal::{FinancialGoal, DEFAULT_GOAL_START_DATE, DEFAULT_GOAL_TARGET};
pub use sales_config::{
    CustomTax, SalesConfig, SplitRates, DEFAULT_EXPERT_SPLIT, DEFAULT_PLATFORM_FEE,
    DEFAULT_TEAM_SPLIT,
};
pub use transaction::{Transaction, TransactionStatus};
