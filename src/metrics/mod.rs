use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for the checkout workflow
// ============================================================================
//
// Provides metrics for:
// - Order outcomes (created / failed by error kind)
// - End-to-end checkout latency
// - Payment gateway attempts (success / transient / declined)
//
// All metrics are registered with one Registry and exposed via /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounterVec,
    pub orders_failed: IntCounterVec,
    pub order_create_duration: HistogramVec,
    pub payment_attempts: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounterVec::new(
            Opts::new("orders_created_total", "Total orders created"),
            &["currency"],
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let orders_failed = IntCounterVec::new(
            Opts::new("orders_failed_total", "Total order creations that failed"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_failed.clone()))?;

        let order_create_duration = HistogramVec::new(
            HistogramOpts::new("order_create_duration_seconds", "Order creation duration")
                .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 5.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(order_create_duration.clone()))?;

        let payment_attempts = IntCounterVec::new(
            Opts::new("payment_attempts_total", "Payment gateway charge attempts"),
            &["outcome"],
        )?;
        registry.register(Box::new(payment_attempts.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            orders_failed,
            order_create_duration,
            payment_attempts,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_created(&self, currency: &str, duration_secs: f64) {
        self.orders_created.with_label_values(&[currency]).inc();
        self.order_create_duration
            .with_label_values(&["success"])
            .observe(duration_secs);
    }

    pub fn record_order_failed(&self, reason: &str, duration_secs: f64) {
        self.orders_failed.with_label_values(&[reason]).inc();
        self.order_create_duration
            .with_label_values(&["failure"])
            .observe(duration_secs);
    }

    pub fn record_payment_attempt(&self, outcome: &str) {
        self.payment_attempts.with_label_values(&[outcome]).inc();
    }

    /// Prometheus text exposition of everything registered
    pub fn encode(&self) -> anyhow::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}
