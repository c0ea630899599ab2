use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Recorded before the order exists; `order_id` is back-filled at checkout.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub payment_id: i32,
    pub order_id: Option<i32>,
    pub payment_date: DateTime<Utc>,
    pub amount: f64,
    pub payment_method: String,
    pub status: String,
    pub transaction_id: String,
    pub card_last4: Option<String>,
    pub paypal_email: Option<String>,
    pub upi_id: Option<String>,
}

// The caller supplies `amount` directly; it is not tied to the cart's
// computed total here.
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    pub user_id: Option<i32>,
    pub cart_id: Option<i32>,
    pub amount: f64,
    pub payment_method: String,
    pub card_last4: Option<String>,
    pub paypal_email: Option<String>,
    pub upi_id: Option<String>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
}
