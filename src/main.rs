use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod db;
mod domain;
mod metrics;
mod payments;
mod services;
mod utils;

use api::AppState;
use config::AppConfig;
use db::{InMemoryOrderRepository, PostgresOrderRepository};
use domain::order::{CheckoutPolicy, CheckoutPorts, CreateOrderHandler, GetOrderHandler, OrderRepository};
use payments::HttpPaymentGateway;
use services::{FixedRateFxConverter, SimplePromoService, ThresholdRiskChecker};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug"))
        )
        .init();

    tracing::info!("🚀 Starting order service");

    // === 1. Configuration ===
    let config = AppConfig::from_env()?;
    tracing::info!(
        host = %config.http_host,
        port = config.http_port,
        postgres = config.database_url.is_some(),
        remote_payments = config.payment.base_url.is_some(),
        "Configuration loaded"
    );

    // === 2. Order storage ===
    let orders: Arc<dyn OrderRepository> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL...");
            Arc::new(PostgresOrderRepository::connect(url).await?)
        }
        None => {
            tracing::warn!("No database configured - orders are kept in memory only");
            Arc::new(InMemoryOrderRepository::new())
        }
    };

    // === 3. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 4. Checkout workflow ===
    let ports = CheckoutPorts {
        orders: orders.clone(),
        payments: Arc::new(HttpPaymentGateway::new(&config.payment)?),
        fx: Arc::new(FixedRateFxConverter::default()),
        promos: Arc::new(SimplePromoService::default()),
        risk: Arc::new(ThresholdRiskChecker::default()),
    };

    let state = AppState {
        create_order: CreateOrderHandler::new(ports, CheckoutPolicy::default())
            .with_metrics(metrics.clone()),
        get_order: GetOrderHandler::new(orders),
        metrics,
    };

    // === 5. HTTP server (runs until shutdown signal) ===
    api::serve(state, config.bind_address()).await?;

    tracing::info!("👋 Order service stopped");
    Ok(())
}
