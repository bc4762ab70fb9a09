use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::{Currency, Order, OrderId, OrderRepository, OrderStatus, RepositoryError};

// ============================================================================
// PostgreSQL Order Repository
// ============================================================================
//
// One row per order keyed by id. `save` is an INSERT ... ON CONFLICT upsert
// executed as a single statement, so concurrent writers to the same id never
// leave a half-written row behind.
//
// ============================================================================

const CREATE_ORDERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS orders (
    id UUID PRIMARY KEY,
    amount_cents BIGINT NOT NULL,
    currency TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)";

type OrderRow = (Uuid, i64, String, String, DateTime<Utc>);

#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// Idempotent; safe to run at every startup
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_ORDERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tracing::info!("orders table ready");
        Ok(())
    }
}

fn row_to_order(row: OrderRow) -> Result<Order, RepositoryError> {
    let (id, amount_cents, currency, status, created_at) = row;

    let corrupt = |e: crate::domain::order::OrderError| {
        RepositoryError::Corrupt(format!("order {}: {}", id, e))
    };

    let currency = Currency::new(&currency).map_err(corrupt)?;
    let status: OrderStatus = status.parse().map_err(corrupt)?;

    Order::reconstitute(OrderId::from(id), amount_cents, currency, status, created_at).map_err(corrupt)
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, amount_cents, currency, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                amount_cents = EXCLUDED.amount_cents,
                currency = EXCLUDED.currency,
                status = EXCLUDED.status,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order.amount_cents())
        .bind(order.currency().as_str())
        .bind(order.status().as_str())
        .bind(order.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tracing::debug!(order_id = %order.id(), "Saved order to postgres");
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            "SELECT id, amount_cents, currency, status, created_at FROM orders WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(row_to_order).transpose()
    }
}
