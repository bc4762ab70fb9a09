use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::value_objects::{Currency, OrderId, OrderStatus};

// ============================================================================
// Order Aggregate
// ============================================================================
//
// An Order is never mutated after construction. State changes produce a new
// value (`with_status`); both constructors enforce the same invariants:
// amount_cents > 0 and a validated, uppercased currency.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    amount_cents: i64,
    currency: Currency,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    /// New order with a fresh id and the current time
    pub fn create(amount_cents: i64, currency: Currency) -> Result<Self, OrderError> {
        // Microsecond precision so the timestamp survives a storage round-trip
        let created_at = Utc::now().trunc_subsecs(6);
        Self::build(OrderId::generate(), amount_cents, currency, OrderStatus::Created, created_at)
    }

    /// Rebuild an order previously persisted with an assigned id and time
    pub fn reconstitute(
        id: OrderId,
        amount_cents: i64,
        currency: Currency,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        Self::build(id, amount_cents, currency, status, created_at)
    }

    fn build(
        id: OrderId,
        amount_cents: i64,
        currency: Currency,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if amount_cents <= 0 {
            return Err(OrderError::validation("amount must be positive in cents"));
        }

        Ok(Self {
            id,
            amount_cents,
            currency,
            status,
            created_at,
        })
    }

    /// New value carrying `status`; identity, amount and creation time are kept
    #[allow(dead_code)]
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            id: self.id,
            amount_cents: self.amount_cents,
            currency: self.currency.clone(),
            status,
            created_at: self.created_at,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> Currency {
        Currency::new("usd").unwrap()
    }

    #[test]
    fn test_create_assigns_identity_and_status() {
        let order = Order::create(1999, usd()).unwrap();

        assert_eq!(order.amount_cents(), 1999);
        assert_eq!(order.currency().as_str(), "USD");
        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(order.created_at().timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_create_generates_distinct_ids() {
        let a = Order::create(100, usd()).unwrap();
        let b = Order::create(100, usd()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        assert!(matches!(Order::create(0, usd()), Err(OrderError::Validation(_))));
        assert!(matches!(Order::create(-5, usd()), Err(OrderError::Validation(_))));
    }

    #[test]
    fn test_reconstitute_keeps_assigned_values() {
        let id = OrderId::generate();
        let created_at = Utc::now().trunc_subsecs(6);

        let order = Order::reconstitute(id, 500, usd(), OrderStatus::Created, created_at).unwrap();

        assert_eq!(order.id(), id);
        assert_eq!(order.created_at(), created_at);
        assert!(Order::reconstitute(id, 0, usd(), OrderStatus::Created, created_at).is_err());
    }

    #[test]
    fn test_with_status_returns_new_value() {
        let original = Order::create(2500, usd()).unwrap();
        let snapshot = original.clone();

        let updated = original.with_status(OrderStatus::Created);

        assert_eq!(original, snapshot);
        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert_eq!(updated.amount_cents(), 2500);
        assert_eq!(updated.status(), OrderStatus::Created);
    }
}
