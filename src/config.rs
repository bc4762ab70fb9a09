use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Defaults suitable for a local run, overridden by ORDER_SERVICE_* variables:
//
//   ORDER_SERVICE_HTTP_HOST           bind address        (0.0.0.0)
//   ORDER_SERVICE_HTTP_PORT           bind port           (8080)
//   ORDER_SERVICE_DATABASE_URL        postgres URL        (unset: in-memory)
//   ORDER_SERVICE_PAYMENT_BASE_URL    payment service URL (unset: simulated)
//   ORDER_SERVICE_PAYMENT_TIMEOUT_MS  request timeout     (2000)
//   ORDER_SERVICE_PAYMENT_LATENCY_MS  simulated latency   (20)
//
// ============================================================================

const ENV_PREFIX: &str = "ORDER_SERVICE_";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("{0} must not be zero")]
    Zero(&'static str),

    #[error("{key} must be an http(s) URL, got '{value}'")]
    InvalidUrl { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSettings {
    /// Remote payment service; `None` simulates the gateway in-process
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub simulated_latency: Duration,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_millis(2000),
            simulated_latency: Duration::from_millis(20),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub http_host: String,
    pub http_port: u16,
    pub database_url: Option<String>,
    pub payment: PaymentSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            database_url: None,
            payment: PaymentSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = var("HTTP_HOST") {
            config.http_host = host;
        }
        if let Some(port) = var("HTTP_PORT") {
            config.http_port = parse_number("HTTP_PORT", &port, "a port number")?;
        }
        config.database_url = var("DATABASE_URL");
        config.payment.base_url = var("PAYMENT_BASE_URL");
        if let Some(ms) = var("PAYMENT_TIMEOUT_MS") {
            config.payment.timeout =
                Duration::from_millis(parse_number("PAYMENT_TIMEOUT_MS", &ms, "milliseconds")?);
        }
        if let Some(ms) = var("PAYMENT_LATENCY_MS") {
            config.payment.simulated_latency =
                Duration::from_millis(parse_number("PAYMENT_LATENCY_MS", &ms, "milliseconds")?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_port == 0 {
            return Err(ConfigError::Zero("HTTP_PORT"));
        }
        if self.payment.timeout.is_zero() {
            return Err(ConfigError::Zero("PAYMENT_TIMEOUT_MS"));
        }
        if let Some(url) = &self.payment.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    key: "PAYMENT_BASE_URL",
                    value: url.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.http_host.clone(), self.http_port)
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: format!("{}{}", ENV_PREFIX, name),
        value: value.to_string(),
        expected,
    })
}
