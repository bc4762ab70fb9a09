use super::errors::OrderError;
use super::value_objects::OrderId;

// ============================================================================
// Order Commands & Queries - Represent user intent
// ============================================================================

/// Validated "create order" input. Currency support is checked later by the
/// handler; here it only has to be present.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderCommand {
    amount_cents: i64,
    currency: String,
    promo_code: Option<String>,
}

impl CreateOrderCommand {
    pub fn new(
        amount_cents: i64,
        currency: impl Into<String>,
        promo_code: Option<String>,
    ) -> Result<Self, OrderError> {
        let currency = currency.into();

        if amount_cents <= 0 {
            return Err(OrderError::validation("amountCents must be > 0"));
        }
        if currency.trim().is_empty() {
            return Err(OrderError::validation("currency cannot be empty"));
        }

        let promo_code = promo_code.filter(|code| !code.trim().is_empty());

        Ok(Self {
            amount_cents,
            currency,
            promo_code,
        })
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }
}

/// Read-path lookup by id
#[derive(Debug, Clone, PartialEq)]
pub struct GetOrderQuery {
    order_id: OrderId,
}

impl GetOrderQuery {
    pub fn new(order_id: &str) -> Result<Self, OrderError> {
        Ok(Self {
            order_id: OrderId::parse(order_id)?,
        })
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }
}
