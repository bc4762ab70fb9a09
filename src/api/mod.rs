use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use crate::domain::order::{CreateOrderHandler, GetOrderHandler};
use crate::metrics::Metrics;

// ============================================================================
// HTTP API (actix-web)
// ============================================================================
//
//   POST /orders        create an order (checkout workflow)
//   GET  /orders/{id}   read back a stored order
//   GET  /health        liveness
//   GET  /metrics       Prometheus exposition
//
// ============================================================================

mod dto;
mod error;
mod handlers;

/// Shared by every worker; handlers are stateless apart from their ports
pub struct AppState {
    pub create_order: CreateOrderHandler,
    pub get_order: GetOrderHandler,
    pub metrics: Arc<Metrics>,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/orders", web::post().to(handlers::create_order))
        .route("/orders/{id}", web::get().to(handlers::get_order))
        .route("/health", web::get().to(handlers::health))
        .route("/metrics", web::get().to(handlers::metrics));
}

pub async fn serve(state: AppState, address: (String, u16)) -> std::io::Result<()> {
    tracing::info!("🌐 Starting HTTP server on http://{}:{}", address.0, address.1);

    let state = web::Data::new(state);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(address)?
        .run()
        .await
}
