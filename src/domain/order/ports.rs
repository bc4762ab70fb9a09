use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::{FxError, PaymentError, RepositoryError};
use super::value_objects::{Currency, OrderId};

// ============================================================================
// Order Ports - Capabilities the checkout workflow depends on
// ============================================================================
//
// All ports are async: any of them may sit behind network I/O, and a waiting
// request must not stall the others in flight.
//
// ============================================================================

#[async_trait]
pub trait PromoService: Send + Sync {
    /// Discount in percent. Expected in [0, 100]; callers clamp anyway.
    async fn discount_percent(&self, promo_code: Option<&str>, currency: &Currency) -> i64;
}

#[async_trait]
pub trait FxConverter: Send + Sync {
    async fn convert(
        &self,
        amount_minor: i64,
        from: &Currency,
        to: &Currency,
    ) -> Result<i64, FxError>;
}

#[async_trait]
pub trait RiskChecker: Send + Sync {
    async fn is_allowed(&self, order: &Order, charged_amount: i64, charged_currency: &Currency) -> bool;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Capture a charge and return the gateway's transaction id
    async fn charge(&self, amount_minor: i64, currency: &Currency) -> Result<String, PaymentError>;
}

/// System of record for orders. `save` is an upsert keyed by order id.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;
}
