use crate::utils::IsTransient;

use super::value_objects::OrderId;

// ============================================================================
// Order Errors
// ============================================================================
//
// One variant per failure kind a caller must be able to tell apart.
// Only TransientPayment is ever produced after a retry loop; every other
// kind aborts the workflow at the step that raised it.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Order rejected by risk engine: {amount_cents} {currency}")]
    OrderRejected { amount_cents: i64, currency: String },

    #[error("Payment temporarily unavailable after {attempts} attempts: {message}")]
    TransientPayment { attempts: u32, message: String },

    #[error("Payment failed: {0}")]
    PaymentDeclined(String),

    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Repository failure: {0}")]
    Repository(#[from] RepositoryError),
}

impl OrderError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::Validation(_) => "validation",
            OrderError::UnsupportedCurrency(_) => "unsupported_currency",
            OrderError::OrderRejected { .. } => "order_rejected",
            OrderError::TransientPayment { .. } => "transient_payment",
            OrderError::PaymentDeclined(_) => "payment_declined",
            OrderError::NotFound(_) => "not_found",
            OrderError::Repository(_) => "repository",
        }
    }
}

impl From<FxError> for OrderError {
    fn from(error: FxError) -> Self {
        match error {
            FxError::UnsupportedCurrency(code) => OrderError::UnsupportedCurrency(code),
        }
    }
}

// ============================================================================
// Port Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FxError {
    #[error("Unsupported currency for FX conversion: {0}")]
    UnsupportedCurrency(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    /// Believed recoverable (timeout, 5xx, open circuit)
    #[error("Transient payment failure: {0}")]
    Transient(String),

    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Invalid charge request: {0}")]
    Invalid(String),
}

impl IsTransient for PaymentError {
    fn is_transient(&self) -> bool {
        matches!(self, PaymentError::Transient(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Storage query failed: {0}")]
    Query(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_error_maps_to_unsupported_currency() {
        let error: OrderError = FxError::UnsupportedCurrency("GBP".into()).into();
        assert!(matches!(error, OrderError::UnsupportedCurrency(ref c) if c == "GBP"));
        assert_eq!(error.kind(), "unsupported_currency");
    }

    #[test]
    fn test_only_transient_payment_errors_are_retryable() {
        assert!(PaymentError::Transient("timeout".into()).is_transient());
        assert!(!PaymentError::Declined("card declined".into()).is_transient());
        assert!(!PaymentError::Invalid("amount".into()).is_transient());
    }

    #[test]
    fn test_repository_error_converts() {
        let error: OrderError = RepositoryError::Query("connection reset".into()).into();
        assert_eq!(error.kind(), "repository");
        assert!(error.to_string().contains("connection reset"));
    }
}
