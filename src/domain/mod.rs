// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with value objects, events,
// commands, errors, ports and handlers. Nothing in here knows about HTTP,
// SQL or the concrete payment provider.
//
// ============================================================================

pub mod order;
