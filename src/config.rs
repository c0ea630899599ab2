// config.rs
use std::env;

use crate::services::checkout::CheckoutPolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    // Flat checkout policy. Injected so tests and deployments can vary it.
    pub tax_rate: f64,
    pub shipping_fee: f64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a number"),
            tax_rate: env::var("TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.08),
            shipping_fee: env::var("SHIPPING_FEE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5.00),
        }
    }

    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            tax_rate: self.tax_rate,
            shipping_fee: self.shipping_fee,
        }
    }
}
