use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::metrics::Metrics;
use crate::utils::{retry_on_transient, IsTransient, RetryConfig, RetryResult, Sleeper, TokioSleeper};

use super::aggregate::Order;
use super::commands::CreateOrderCommand;
use super::errors::{OrderError, PaymentError};
use super::events::OrderCreated;
use super::money::apply_discount;
use super::ports::{FxConverter, OrderRepository, PaymentGateway, PromoService, RiskChecker};
use super::value_objects::Currency;

// ============================================================================
// Create Order Command Handler
// ============================================================================
//
// Orchestrates: Command → currency check → Order → discount → FX →
//               risk → payment (with retry) → repository → OrderCreated
//
// Every step runs strictly after the previous one. Nothing irreversible
// (payment capture, persistence) happens before all checks have passed, and
// any failure after a check leaves the repository untouched.
//
// ============================================================================

/// Marks transaction ids of orders that were settled without a charge
pub const FREE_TRANSACTION_PREFIX: &str = "free_";

/// Checkout rules owned by the handler
#[derive(Debug, Clone)]
pub struct CheckoutPolicy {
    pub supported_currencies: Vec<Currency>,
    pub settlement_currency: Currency,
    pub retry: RetryConfig,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            supported_currencies: vec![
                Currency::known("USD"),
                Currency::known("EUR"),
                Currency::known("UAH"),
            ],
            settlement_currency: Currency::known("USD"),
            retry: RetryConfig::default(),
        }
    }
}

impl CheckoutPolicy {
    pub fn supports(&self, currency: &Currency) -> bool {
        self.supported_currencies.contains(currency)
    }
}

/// The five capabilities the workflow is composed of
#[derive(Clone)]
pub struct CheckoutPorts {
    pub orders: Arc<dyn OrderRepository>,
    pub payments: Arc<dyn PaymentGateway>,
    pub fx: Arc<dyn FxConverter>,
    pub promos: Arc<dyn PromoService>,
    pub risk: Arc<dyn RiskChecker>,
}

pub struct CreateOrderHandler {
    ports: CheckoutPorts,
    policy: CheckoutPolicy,
    sleeper: Arc<dyn Sleeper>,
    metrics: Option<Arc<Metrics>>,
}

impl CreateOrderHandler {
    pub fn new(ports: CheckoutPorts, policy: CheckoutPolicy) -> Self {
        Self {
            ports,
            policy,
            sleeper: Arc::new(TokioSleeper),
            metrics: None,
        }
    }

    /// Replace the backoff sleeper (tests record delays instead of waiting)
    #[cfg(test)]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run the checkout workflow for one command
    pub async fn execute(&self, command: CreateOrderCommand) -> Result<OrderCreated, OrderError> {
        let started = Instant::now();
        let result = self.create_order(command).await;
        let elapsed = started.elapsed().as_secs_f64();

        match &result {
            Ok(event) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_order_created(event.currency.as_str(), elapsed);
                }
                tracing::info!(
                    event_type = OrderCreated::event_type(),
                    order_id = %event.order_id,
                    charged_amount = event.charged_amount_cents,
                    charged_currency = %event.charged_currency,
                    transaction_id = %event.transaction_id,
                    "✅ Order created"
                );
            }
            Err(error) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_order_failed(error.kind(), elapsed);
                }
                tracing::warn!(kind = error.kind(), error = %error, "Order creation failed");
            }
        }

        result
    }

    async fn create_order(&self, command: CreateOrderCommand) -> Result<OrderCreated, OrderError> {
        // 1) Currency must be supported before anything else is touched
        let currency = Currency::new(command.currency())
            .ok()
            .filter(|currency| self.policy.supports(currency))
            .ok_or_else(|| {
                OrderError::UnsupportedCurrency(command.currency().trim().to_uppercase())
            })?;

        // 2) Provisional order; its id is the one reported back
        let order = Order::create(command.amount_cents(), currency.clone())?;

        // 3) Promo discount, clamped whatever the promo service says
        let raw_percent = self
            .ports
            .promos
            .discount_percent(command.promo_code(), &currency)
            .await;
        let discount_percent = raw_percent.clamp(0, 100) as u8;
        if raw_percent != discount_percent as i64 {
            tracing::warn!(
                raw_percent = raw_percent,
                clamped = discount_percent,
                "Promo service returned out-of-range discount"
            );
        }
        let discounted_amount = apply_discount(order.amount_cents(), discount_percent);

        // 4) FX conversion into the settlement currency
        let charged_currency = self.policy.settlement_currency.clone();
        let charged_amount = self
            .ports
            .fx
            .convert(discounted_amount, &currency, &charged_currency)
            .await?;
        if charged_amount < 0 {
            return Err(OrderError::validation("FX conversion produced a negative amount"));
        }

        tracing::debug!(
            order_id = %order.id(),
            discount_percent = discount_percent,
            discounted_amount = discounted_amount,
            charged_amount = charged_amount,
            charged_currency = %charged_currency,
            "Priced order"
        );

        // 5) Risk screening on the amount actually charged
        if !self
            .ports
            .risk
            .is_allowed(&order, charged_amount, &charged_currency)
            .await
        {
            return Err(OrderError::OrderRejected {
                amount_cents: charged_amount,
                currency: charged_currency.to_string(),
            });
        }

        // 6) Payment
        let transaction_id = if charged_amount == 0 {
            free_transaction_id()
        } else {
            self.capture_payment(charged_amount, &charged_currency).await?
        };

        // 7) Persist only once a transaction id exists
        self.ports.orders.save(&order).await?;

        // 8) Event
        Ok(OrderCreated {
            order_id: order.id(),
            amount_cents: order.amount_cents(),
            currency: order.currency().clone(),
            occurred_at: Utc::now(),
            charged_amount_cents: charged_amount,
            charged_currency,
            applied_discount_percent: discount_percent,
            transaction_id,
        })
    }

    async fn capture_payment(&self, amount: i64, currency: &Currency) -> Result<String, OrderError> {
        let payments = &self.ports.payments;
        let metrics = self.metrics.as_deref();

        let result = retry_on_transient(&self.policy.retry, self.sleeper.as_ref(), |attempt| async move {
            let outcome = payments.charge(amount, currency).await;

            if let Some(metrics) = metrics {
                metrics.record_payment_attempt(match &outcome {
                    Ok(_) => "success",
                    Err(e) if e.is_transient() => "transient",
                    Err(_) => "declined",
                });
            }
            tracing::debug!(attempt = attempt, ok = outcome.is_ok(), "Payment attempt finished");

            outcome
        })
        .await;

        match result {
            RetryResult::Success { value, attempts } => {
                tracing::debug!(attempts = attempts, "Payment captured");
                Ok(value)
            }
            RetryResult::Failed { error, attempts } => Err(OrderError::TransientPayment {
                attempts,
                message: error.to_string(),
            }),
            RetryResult::PermanentFailure { error, attempts } => {
                tracing::debug!(attempts = attempts, "Payment failed permanently");
                Err(match error {
                    PaymentError::Transient(message)
                    | PaymentError::Declined(message)
                    | PaymentError::Invalid(message) => OrderError::PaymentDeclined(message),
                })
            }
        }
    }
}

/// Local id for orders that needed no charge, never issued by a gateway
fn free_transaction_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", FREE_TRANSACTION_PREFIX, &random[..8])
}

// ============================================================================
// Unit Tests
// ============================================================================
