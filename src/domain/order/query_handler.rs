use std::sync::Arc;

use super::aggregate::Order;
use super::commands::GetOrderQuery;
use super::errors::OrderError;
use super::ports::OrderRepository;

// ============================================================================
// Get Order Query Handler
// ============================================================================

pub struct GetOrderHandler {
    orders: Arc<dyn OrderRepository>,
}

impl GetOrderHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn execute(&self, query: GetOrderQuery) -> Result<Order, OrderError> {
        let order_id = query.order_id();

        match self.orders.get(&order_id).await? {
            Some(order) => Ok(order),
            None => {
                tracing::debug!(order_id = %order_id, "Order not found");
                Err(OrderError::NotFound(order_id))
            }
        }
    }
}
