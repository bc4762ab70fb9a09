use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::config::PaymentSettings;
use crate::domain::order::{Currency, PaymentError, PaymentGateway};
use crate::utils::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, IsTransient};

// ============================================================================
// HTTP Payment Gateway
// ============================================================================
//
// Talks to the payment service over HTTP:
//
//   POST {base_url}/payments/charge   {"amountCents": 9900, "currency": "USD"}
//   201 Created                       {"transactionId": "tx_..."}
//
// Without a base URL the gateway is simulated in-process for local runs.
// Every remote call goes through a circuit breaker; only transient failures
// count against it.
//
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChargeRequest<'a> {
    amount_cents: i64,
    currency: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChargeResponse {
    transaction_id: String,
}

pub struct HttpPaymentGateway {
    client: reqwest::Client,
    charge_url: Option<String>,
    simulated_latency: Duration,
    circuit_breaker: CircuitBreaker,
}

impl HttpPaymentGateway {
    pub fn new(settings: &PaymentSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(settings.timeout).build()?;

        let charge_url = settings
            .base_url
            .as_ref()
            .map(|base| format!("{}/payments/charge", base.trim_end_matches('/')));

        match &charge_url {
            Some(url) => tracing::info!(url = %url, "Payment gateway: remote"),
            None => tracing::info!(
                latency_ms = settings.simulated_latency.as_millis() as u64,
                "Payment gateway: simulated"
            ),
        }

        Ok(Self {
            client,
            charge_url,
            simulated_latency: settings.simulated_latency,
            circuit_breaker: CircuitBreaker::new(CircuitBreakerConfig::default()),
        })
    }

    #[cfg(test)]
    pub fn with_circuit_breaker(mut self, circuit_breaker: CircuitBreaker) -> Self {
        self.circuit_breaker = circuit_breaker;
        self
    }

    async fn simulate(&self) -> String {
        tokio::time::sleep(self.simulated_latency).await;
        let random = Uuid::new_v4().simple().to_string();
        format!("tx_{}", &random[..12])
    }

    async fn post_charge(&self, url: &str, amount_cents: i64, currency: &Currency) -> Result<String, PaymentError> {
        let response = self
            .client
            .post(url)
            .json(&ChargeRequest {
                amount_cents,
                currency: currency.as_str(),
            })
            .send()
            .await
            .map_err(|e| PaymentError::Transient(format!("payment service unreachable: {}", e)))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body: ChargeResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Transient(format!("invalid response from payment service: {}", e)))?;

        if body.transaction_id.trim().is_empty() {
            return Err(PaymentError::Transient(
                "invalid response from payment service: empty transactionId".to_string(),
            ));
        }

        Ok(body.transaction_id)
    }
}

/// Map a non-201 response onto the payment error taxonomy
fn classify_status(status: StatusCode, body: &str) -> PaymentError {
    let message = if body.trim().is_empty() {
        format!("payment service responded with status {}", status.as_u16())
    } else {
        format!("payment service responded with status {}: {}", status.as_u16(), body.trim())
    };

    // 408 Request Timeout, 425 Too Early, 429 Too Many Requests
    let retryable_client_error = matches!(status.as_u16(), 408 | 425 | 429);

    if retryable_client_error || status.is_server_error() {
        PaymentError::Transient(message)
    } else if status.is_client_error() {
        PaymentError::Declined(message)
    } else {
        // 1xx/2xx other than 201, 3xx: the contract was not honoured
        PaymentError::Transient(message)
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn charge(&self, amount_cents: i64, currency: &Currency) -> Result<String, PaymentError> {
        if amount_cents <= 0 {
            return Err(PaymentError::Invalid("charge amount must be > 0".to_string()));
        }

        let Some(url) = &self.charge_url else {
            return Ok(self.simulate().await);
        };

        let result = self
            .circuit_breaker
            .call(self.post_charge(url, amount_cents, currency), |e: &PaymentError| e.is_transient())
            .await;

        match result {
            Ok(transaction_id) => {
                tracing::debug!(
                    amount_cents = amount_cents,
                    currency = %currency,
                    transaction_id = %transaction_id,
                    "💳 Charge accepted"
                );
                Ok(transaction_id)
            }
            Err(CircuitBreakerError::CircuitOpen) => {
                let state = self.circuit_breaker.state().await;
                tracing::error!(
                    state = state.as_str(),
                    "Circuit breaker open - payment service unavailable"
                );
                Err(PaymentError::Transient("payment circuit open".to_string()))
            }
            Err(CircuitBreakerError::OperationFailed(e)) => {
                tracing::warn!(error = %e, amount_cents = amount_cents, "Charge failed");
                Err(e)
            }
        }
    }
}
