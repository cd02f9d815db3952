//! Payment provider adapters implementing the ProviderClient port.

mod http_client;
mod noop;

pub use http_client::{HttpProviderClient, ProviderApiConfig};
pub use noop::NoopProviderClient;
