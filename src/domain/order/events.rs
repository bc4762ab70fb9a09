use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{Currency, OrderId};

// ============================================================================
// Order Events
// ============================================================================

/// Order Created - emitted once per successful checkout
///
/// Carries both what the customer asked for (amount/currency) and what was
/// actually settled (charged amount/currency after discount and FX).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub amount_cents: i64,
    pub currency: Currency,
    pub occurred_at: DateTime<Utc>,
    pub charged_amount_cents: i64,
    pub charged_currency: Currency,
    pub applied_discount_percent: u8,
    pub transaction_id: String,
}

impl OrderCreated {
    pub fn event_type() -> &'static str {
        "OrderCreated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_created_serializes_camel_case() {
        let event = OrderCreated {
            order_id: OrderId::generate(),
            amount_cents: 10000,
            currency: Currency::new("EUR").unwrap(),
            occurred_at: Utc::now(),
            charged_amount_cents: 9900,
            charged_currency: Currency::new("USD").unwrap(),
            applied_discount_percent: 10,
            transaction_id: "tx_fixed".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["orderId"], event.order_id.to_string());
        assert_eq!(json["amountCents"], 10000);
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["chargedAmountCents"], 9900);
        assert_eq!(json["chargedCurrency"], "USD");
        assert_eq!(json["appliedDiscountPercent"], 10);
        assert_eq!(json["transactionId"], "tx_fixed");
        assert!(json["occurredAt"].as_str().unwrap().contains('T'));
    }
}
