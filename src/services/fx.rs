use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::order::{div_round_half_away, Currency, FxConverter, FxError};

// ============================================================================
// Fixed-Rate FX Converter
// ============================================================================
//
// Rates are expressed against a USD pivot in parts per million, so every
// conversion is exact integer math: amount * rate_from / rate_to, rounded
// half away from zero.
//
// ============================================================================

const RATE_SCALE: i64 = 1_000_000;

pub struct FixedRateFxConverter {
    rates_ppm: HashMap<String, i64>,
}

impl FixedRateFxConverter {
    pub fn new(rates_ppm: impl IntoIterator<Item = (String, i64)>) -> Self {
        Self {
            rates_ppm: rates_ppm
                .into_iter()
                .map(|(code, rate)| (code.to_uppercase(), rate))
                .collect(),
        }
    }

    fn rate(&self, currency: &Currency) -> Result<i64, FxError> {
        self.rates_ppm
            .get(currency.as_str())
            .copied()
            .filter(|rate| *rate > 0)
            .ok_or_else(|| FxError::UnsupportedCurrency(currency.to_string()))
    }
}

impl Default for FixedRateFxConverter {
    fn default() -> Self {
        Self::new([
            ("USD".to_string(), RATE_SCALE),
            ("EUR".to_string(), 1_100_000), // 1 EUR = 1.10 USD
            ("UAH".to_string(), 27_000),    // 1 UAH = 0.027 USD
        ])
    }
}

#[async_trait]
impl FxConverter for FixedRateFxConverter {
    async fn convert(
        &self,
        amount_minor: i64,
        from: &Currency,
        to: &Currency,
    ) -> Result<i64, FxError> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;

        if from == to {
            return Ok(amount_minor);
        }

        let converted = div_round_half_away(
            amount_minor as i128 * from_rate as i128,
            to_rate as i128,
        );

        // Saturate rather than wrap on absurd inputs
        let converted = i64::try_from(converted).unwrap_or(if converted < 0 { i64::MIN } else { i64::MAX });

        tracing::debug!(
            amount = amount_minor,
            from = %from,
            to = %to,
            converted = converted,
            "Converted amount"
        );

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    #[tokio::test]
    async fn test_eur_to_usd() {
        let fx = FixedRateFxConverter::default();
        assert_eq!(fx.convert(9000, &c("EUR"), &c("USD")).await, Ok(9900));
    }

    #[tokio::test]
    async fn test_uah_to_usd_rounds() {
        let fx = FixedRateFxConverter::default();
        // 1000.50 UAH * 0.027 = 27.0135 USD
        assert_eq!(fx.convert(100_050, &c("UAH"), &c("USD")).await, Ok(2701));
        // 0.50 UAH * 0.027 = 0.0135 USD
        assert_eq!(fx.convert(50, &c("UAH"), &c("USD")).await, Ok(1));
    }

    #[tokio::test]
    async fn test_usd_to_eur_via_pivot() {
        let fx = FixedRateFxConverter::default();
        // 11.00 USD / 1.10 = 10.00 EUR
        assert_eq!(fx.convert(1100, &c("USD"), &c("EUR")).await, Ok(1000));
    }

    #[tokio::test]
    async fn test_same_currency_passes_through() {
        let fx = FixedRateFxConverter::default();
        assert_eq!(fx.convert(12_345, &c("EUR"), &c("EUR")).await, Ok(12_345));
    }

    #[tokio::test]
    async fn test_unknown_currency_fails() {
        let fx = FixedRateFxConverter::default();

        assert_eq!(
            fx.convert(100, &c("GBP"), &c("USD")).await,
            Err(FxError::UnsupportedCurrency("GBP".into()))
        );
        assert_eq!(
            fx.convert(100, &c("USD"), &c("GBP")).await,
            Err(FxError::UnsupportedCurrency("GBP".into()))
        );
        // Unknown codes fail even when identical
        assert!(fx.convert(100, &c("GBP"), &c("GBP")).await.is_err());
    }
}
