// ============================================================================
// Order Domain - Checkout Workflow for the Order Aggregate
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderId, Currency, OrderStatus)
// - Money arithmetic (discounts, rounding)
// - Events (OrderCreated)
// - Commands & queries (CreateOrderCommand, GetOrderQuery)
// - Errors (OrderError and the per-port errors)
// - Ports (promo, FX, risk, payment, repository)
// - Handlers (CreateOrderHandler, GetOrderHandler)
//
// Concrete adapters live outside the domain (services/, payments/, db/).
//
// ============================================================================

pub mod value_objects;
pub mod money;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod ports;
pub mod command_handler;
pub mod query_handler;

// Re-export for convenience
pub use value_objects::*;
pub use money::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use ports::*;
pub use command_handler::*;
pub use query_handler::*;
