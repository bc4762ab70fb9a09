use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::order::{Order, OrderId, OrderRepository, RepositoryError};

// ============================================================================
// In-Memory Order Repository
// ============================================================================
//
// Whole `Order` values are inserted and cloned out under the lock, so a
// reader only ever sees a complete record or nothing.
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    storage: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut storage = self.storage.write().await;
        storage.insert(order.id(), order.clone());

        tracing::debug!(order_id = %order.id(), "Saved order in memory");
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }
}
