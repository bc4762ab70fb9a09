// ============================================================================
// Payment Gateway Adapters
// ============================================================================

mod http_gateway;

pub use http_gateway::HttpPaymentGateway;
