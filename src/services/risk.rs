use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::order::{Currency, Order, RiskChecker};

// ============================================================================
// Threshold Risk Checker
// ============================================================================

/// Denies charges strictly above a per-currency limit. Currencies without a
/// configured limit are allowed.
pub struct ThresholdRiskChecker {
    limits: HashMap<String, i64>,
}

impl ThresholdRiskChecker {
    pub fn new(limits: impl IntoIterator<Item = (String, i64)>) -> Self {
        Self {
            limits: limits
                .into_iter()
                .map(|(code, limit)| (code.to_uppercase(), limit))
                .collect(),
        }
    }
}

impl Default for ThresholdRiskChecker {
    fn default() -> Self {
        Self::new([
            ("USD".to_string(), 100_000),   // $1000.00
            ("UAH".to_string(), 1_500_000), // 15000.00 UAH
        ])
    }
}

#[async_trait]
impl RiskChecker for ThresholdRiskChecker {
    async fn is_allowed(&self, order: &Order, charged_amount: i64, charged_currency: &Currency) -> bool {
        match self.limits.get(charged_currency.as_str()) {
            Some(limit) if charged_amount > *limit => {
                tracing::warn!(
                    order_id = %order.id(),
                    charged_amount = charged_amount,
                    currency = %charged_currency,
                    limit = *limit,
                    "Charge above risk limit"
                );
                false
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::create(1, Currency::new("USD").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_usd_limit_boundary() {
        let risk = ThresholdRiskChecker::default();
        let usd = Currency::new("USD").unwrap();

        assert!(risk.is_allowed(&order(), 100_000, &usd).await);
        assert!(!risk.is_allowed(&order(), 100_001, &usd).await);
    }

    #[tokio::test]
    async fn test_uah_limit_boundary() {
        let risk = ThresholdRiskChecker::default();
        let uah = Currency::new("UAH").unwrap();

        assert!(risk.is_allowed(&order(), 1_500_000, &uah).await);
        assert!(!risk.is_allowed(&order(), 1_500_001, &uah).await);
    }

    #[tokio::test]
    async fn test_currency_without_limit_is_allowed() {
        let risk = ThresholdRiskChecker::default();
        let eur = Currency::new("EUR").unwrap();

        assert!(risk.is_allowed(&order(), i64::MAX, &eur).await);
    }
}
