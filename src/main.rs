//! Tenant Ledger service binary.
//!
//! Wires configuration, the PostgreSQL pool, and the HTTP routers
//! together and serves the API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tenant_ledger::adapters::http::billing::{billing_routes, webhook_routes, BillingAppState};
use tenant_ledger::adapters::http::metrics::{metrics_routes, MetricsAppState};
use tenant_ledger::adapters::postgres::{
    PostgresLedgerReader, PostgresSalesConfigReader, PostgresSubscriptionStore,
    PostgresTenantDirectory,
};
use tenant_ledger::adapters::provider::{
    HttpProviderClient, NoopProviderClient, ProviderApiConfig,
};
use tenant_ledger::config::AppConfig;
use tenant_ledger::domain::billing::WebhookVerifier;
use tenant_ledger::ports::ProviderClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let provider: Arc<dyn ProviderClient> = match (
        &config.billing.provider_api_token,
        &config.billing.provider_api_base_url,
    ) {
        (Some(token), Some(base_url)) => Arc::new(HttpProviderClient::new(
            ProviderApiConfig::new(token.clone(), base_url.clone()),
        )),
        _ => Arc::new(NoopProviderClient),
    };

    let billing_state = BillingAppState {
        directory: Arc::new(PostgresTenantDirectory::new(pool.clone())),
        store: Arc::new(PostgresSubscriptionStore::new(pool.clone())),
        provider,
        checkout_urls: config.billing.checkout_urls(),
        webhook_verifier: config
            .billing
            .webhook_secret
            .as_ref()
            .map(|secret| Arc::new(WebhookVerifier::new(secret.clone()))),
    };

    let metrics_state = MetricsAppState {
        ledger: Arc::new(PostgresLedgerReader::new(pool.clone())),
        config_reader: Arc::new(PostgresSalesConfigReader::new(pool)),
    };

    let app = Router::new()
        .nest(
            "/api/billing",
            billing_routes().with_state(billing_state.clone()),
        )
        .nest("/webhooks", webhook_routes().with_state(billing_state))
        .nest("/api/metrics", metrics_routes().with_state(metrics_state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    info!(%addr, "tenant-ledger listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse::<http::HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::HeaderName::from_static("x-tenant-id"),
        ])
        .allow_origin(origins)
}
