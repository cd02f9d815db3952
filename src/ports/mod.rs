//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Billing Ports
//!
//! - `SubscriptionStore` - tenant-keyed idempotent subscription upserts
//! - `TenantDirectory` - email -> account -> tenant resolution lookups
//! - `ProviderClient` - outbound payment provider management calls
//!
//! ## Metrics Ports
//!
//! - `LedgerReader` - read-only transaction ledger access
//! - `SalesConfigReader` - read-only operator sales configuration

mod ledger_reader;
mod provider_client;
mod sales_config_reader;
mod subscription_store;
mod tenant_directory;

pub use ledger_reader::LedgerReader;
pub use provider_client::{ProviderClient, ProviderError};
pub use sales_config_reader::SalesConfigReader;
pub use subscription_store::SubscriptionStore;
pub use tenant_directory::{AccountProfile, TenantDirectory, TenantMembership};
