//! Tenant Ledger - Tenant Financial State Engine
//!
//! Keeps each tenant's billing state and derived financial metrics
//! correct in the face of out-of-order, duplicated payment-provider
//! webhooks, manual operator overrides, and tenant-specific fee-split
//! and tax rules.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
