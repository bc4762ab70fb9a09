use actix_web::{web, HttpResponse, Responder};

use super::dto::{CreateOrderRequest, OrderResponse};
use super::error::ApiError;
use super::AppState;
use crate::domain::order::{CreateOrderCommand, GetOrderQuery, OrderError};

pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    // Malformed JSON and well-formed JSON of the wrong shape are reported differently
    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?;
    let request: CreateOrderRequest =
        serde_json::from_value(value).map_err(|e| OrderError::validation(e.to_string()))?;

    let command = CreateOrderCommand::new(request.amount_cents, request.currency, request.promo_code)?;
    let event = state.create_order.execute(command).await?;

    Ok(HttpResponse::Created().json(event))
}

pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let query = GetOrderQuery::new(&path.into_inner())?;
    let order = state.get_order.execute(query).await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "order-service"
    }))
}

pub async fn metrics(state: web::Data<AppState>) -> impl Responder {
    match state.metrics.encode() {
        Ok(buffer) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::ErrorResponse;
    use crate::api::routes;
    use crate::config::PaymentSettings;
    use crate::db::InMemoryOrderRepository;
    use crate::domain::order::events::OrderCreated;
    use crate::domain::order::{
        CheckoutPolicy, CheckoutPorts, CreateOrderHandler, Currency, GetOrderHandler,
        PaymentError, PaymentGateway,
    };
    use crate::metrics::Metrics;
    use crate::payments::HttpPaymentGateway;
    use crate::services::{FixedRateFxConverter, SimplePromoService, ThresholdRiskChecker};
    use crate::utils::retry::tests::RecordingSleeper;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct UnavailableGateway;

    #[async_trait]
    impl PaymentGateway for UnavailableGateway {
        async fn charge(&self, _amount: i64, _currency: &Currency) -> Result<String, PaymentError> {
            Err(PaymentError::Transient("timeout".into()))
        }
    }

    fn state_with(payments: Arc<dyn PaymentGateway>) -> web::Data<AppState> {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let metrics = Arc::new(Metrics::new().unwrap());

        let create_order = CreateOrderHandler::new(
            CheckoutPorts {
                orders: orders.clone(),
                payments,
                fx: Arc::new(FixedRateFxConverter::default()),
                promos: Arc::new(SimplePromoService::default()),
                risk: Arc::new(ThresholdRiskChecker::default()),
            },
            CheckoutPolicy::default(),
        )
        .with_sleeper(Arc::new(RecordingSleeper::default()))
        .with_metrics(metrics.clone());

        web::Data::new(AppState {
            create_order,
            get_order: GetOrderHandler::new(orders),
            metrics,
        })
    }

    fn state() -> web::Data<AppState> {
        let gateway = HttpPaymentGateway::new(&PaymentSettings {
            simulated_latency: Duration::ZERO,
            ..PaymentSettings::default()
        })
        .unwrap();
        state_with(Arc::new(gateway))
    }

    fn post_order(body: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/orders")
            .insert_header(("content-type", "application/json"))
            .set_payload(body.to_string())
    }

    #[actix_web::test]
    async fn test_create_then_get_order() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;

        let resp = test::call_service(
            &app,
            post_order(r#"{"amountCents": 10000, "currency": "EUR", "promoCode": "PROMO10"}"#).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let event: OrderCreated = test::read_body_json(resp).await;
        assert_eq!(event.charged_amount_cents, 9900);
        assert_eq!(event.charged_currency.as_str(), "USD");
        assert_eq!(event.applied_discount_percent, 10);
        assert!(event.transaction_id.starts_with("tx_"));

        let req = test::TestRequest::get()
            .uri(&format!("/orders/{}", event.order_id))
            .to_request();
        let order: OrderResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(order.order_id, event.order_id.to_string());
        assert_eq!(order.amount_cents, 10000);
        assert_eq!(order.currency, "EUR");
        assert_eq!(order.status, "created");
    }

    #[actix_web::test]
    async fn test_create_order_error_statuses() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;

        let cases = [
            (r#"{"amountCents": 100, "currency": "USD""#, StatusCode::BAD_REQUEST),
            (r#"{"amountCents": "100", "currency": "USD"}"#, StatusCode::UNPROCESSABLE_ENTITY),
            (r#"{"currency": "USD"}"#, StatusCode::UNPROCESSABLE_ENTITY),
            (r#"{"amountCents": 0, "currency": "USD"}"#, StatusCode::UNPROCESSABLE_ENTITY),
            (r#"{"amountCents": 100, "currency": "GBP"}"#, StatusCode::BAD_REQUEST),
            (r#"{"amountCents": 100001, "currency": "USD"}"#, StatusCode::FORBIDDEN),
        ];

        for (body, expected) in cases {
            let resp = test::call_service(&app, post_order(body).to_request()).await;
            assert_eq!(resp.status(), expected, "{}", body);
        }
    }

    #[actix_web::test]
    async fn test_invalid_json_body_message() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;

        let resp = test::call_service(&app, post_order("not json").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid JSON body");
    }

    #[actix_web::test]
    async fn test_exhausted_payment_returns_503() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(Arc::new(UnavailableGateway)))
                .configure(routes),
        )
        .await;

        let resp = test::call_service(
            &app,
            post_order(r#"{"amountCents": 500, "currency": "USD"}"#).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Payment temporarily unavailable");
    }

    #[actix_web::test]
    async fn test_get_order_not_found_and_malformed_id() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;

        let missing = format!("/orders/{}", uuid::Uuid::new_v4());
        let resp = test::call_service(&app, test::TestRequest::get().uri(&missing).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/orders/nope").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_health_and_metrics() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health, serde_json::json!({"status": "healthy", "service": "order-service"}));

        let _ = test::call_service(
            &app,
            post_order(r#"{"amountCents": 100, "currency": "UAH"}"#).to_request(),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("orders_created_total"));
        assert!(text.contains("payment_attempts_total"));
    }
}
