use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::order::{Currency, PromoService};

// ============================================================================
// Simple Promo Service - fixed code table
// ============================================================================

pub struct SimplePromoService {
    codes: HashMap<String, i64>,
}

impl SimplePromoService {
    /// Codes are matched after trimming and uppercasing
    pub fn new(codes: impl IntoIterator<Item = (String, i64)>) -> Self {
        Self {
            codes: codes
                .into_iter()
                .map(|(code, percent)| (code.trim().to_uppercase(), percent))
                .collect(),
        }
    }
}

impl Default for SimplePromoService {
    fn default() -> Self {
        Self::new([
            ("PROMO10".to_string(), 10),
            ("PROMO25".to_string(), 25),
            ("FREE100".to_string(), 100),
        ])
    }
}

#[async_trait]
impl PromoService for SimplePromoService {
    async fn discount_percent(&self, promo_code: Option<&str>, _currency: &Currency) -> i64 {
        let Some(code) = promo_code else {
            return 0;
        };

        let percent = self
            .codes
            .get(&code.trim().to_uppercase())
            .copied()
            .unwrap_or(0);

        tracing::debug!(promo_code = %code, percent = percent, "Resolved promo code");
        percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_codes() {
        let promos = SimplePromoService::default();
        let usd = Currency::new("USD").unwrap();

        assert_eq!(promos.discount_percent(Some("PROMO10"), &usd).await, 10);
        assert_eq!(promos.discount_percent(Some("promo25"), &usd).await, 25);
        assert_eq!(promos.discount_percent(Some("  free100 "), &usd).await, 100);
    }

    #[tokio::test]
    async fn test_unknown_or_missing_code_is_zero() {
        let promos = SimplePromoService::default();
        let eur = Currency::new("EUR").unwrap();

        assert_eq!(promos.discount_percent(Some("BOGUS"), &eur).await, 0);
        assert_eq!(promos.discount_percent(None, &eur).await, 0);
    }

    #[tokio::test]
    async fn test_custom_table() {
        let promos = SimplePromoService::new([("half".to_string(), 50)]);
        let usd = Currency::new("USD").unwrap();

        assert_eq!(promos.discount_percent(Some("HALF"), &usd).await, 50);
        assert_eq!(promos.discount_percent(Some("PROMO10"), &usd).await, 0);
    }
}
