use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use super::dto::ErrorResponse;
use crate::domain::order::OrderError;

// ============================================================================
// Error → HTTP mapping
// ============================================================================
//
//   invalid JSON              400
//   Validation                422
//   UnsupportedCurrency       400
//   OrderRejected             403
//   TransientPayment          503
//   PaymentDeclined           400
//   NotFound                  404
//   Repository                500
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl ApiError {
    fn public_message(&self) -> String {
        match self {
            ApiError::Order(OrderError::TransientPayment { .. }) => {
                "Payment temporarily unavailable".to_string()
            }
            ApiError::Order(OrderError::Repository(_)) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson => StatusCode::BAD_REQUEST,
            ApiError::Order(error) => match error {
                OrderError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                OrderError::UnsupportedCurrency(_) => StatusCode::BAD_REQUEST,
                OrderError::OrderRejected { .. } => StatusCode::FORBIDDEN,
                OrderError::TransientPayment { .. } => StatusCode::SERVICE_UNAVAILABLE,
                OrderError::PaymentDeclined(_) => StatusCode::BAD_REQUEST,
                OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
        })
    }
}
