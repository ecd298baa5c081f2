use rust_decimal::Decimal;

use crate::auth::JwtConfig;

/// Checkout parameters
///
/// All monetary knobs are decimals so pricing math never touches floats.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Sales tax rate applied to the subtotal (0.07 = 7%)
    pub tax_rate: Decimal,
    /// Orders at or above this subtotal ship free
    pub free_delivery_threshold: Decimal,
    /// Flat delivery fee below the threshold
    pub delivery_fee: Decimal,
    /// Estimated delivery offset from placement time, in hours
    pub delivery_offset_hours: i64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(7, 2),
            free_delivery_threshold: Decimal::new(5000, 2),
            delivery_fee: Decimal::new(599, 2),
            delivery_offset_hours: 2,
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/storefront | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | TAX_RATE | 0.07 | Sales tax rate |
/// | FREE_DELIVERY_THRESHOLD | 50.00 | Free delivery threshold |
/// | DELIVERY_FEE | 5.99 | Flat delivery fee |
/// | DELIVERY_OFFSET_HOURS | 2 | Estimated delivery offset |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT verification config
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Checkout parameters
    pub checkout: CheckoutConfig,
}

fn env_decimal(name: &str, default: Decimal) -> Decimal {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = CheckoutConfig::default();
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            checkout: CheckoutConfig {
                tax_rate: env_decimal("TAX_RATE", defaults.tax_rate),
                free_delivery_threshold: env_decimal(
                    "FREE_DELIVERY_THRESHOLD",
                    defaults.free_delivery_threshold,
                ),
                delivery_fee: env_decimal("DELIVERY_FEE", defaults.delivery_fee),
                delivery_offset_hours: std::env::var("DELIVERY_OFFSET_HOURS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.delivery_offset_hours),
            },
        }
    }

    /// Database directory under the working directory
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.work_dir).join("database")
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_defaults() {
        let checkout = CheckoutConfig::default();
        assert_eq!(checkout.tax_rate, Decimal::new(7, 2));
        assert_eq!(checkout.free_delivery_threshold, Decimal::new(5000, 2));
        assert_eq!(checkout.delivery_fee, Decimal::new(599, 2));
        assert_eq!(checkout.delivery_offset_hours, 2);
    }
}
