// ============================================================================
// Order Storage Adapters
// ============================================================================
//
// - in_memory: default store, also used by tests
// - postgres:  used when a database URL is configured
//
// ============================================================================

mod in_memory;
mod postgres;

pub use in_memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
