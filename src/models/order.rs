use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::payment::Payment;

// Immutable once created, except for `status`/`updated_at` which an
// administrative actor may change later.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub order_date: DateTime<Utc>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
    pub status: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub updated_at: DateTime<Utc>,
}

// Order line with the unit price frozen at order time
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItemDetail {
    pub order_item_id: i32,
    pub order_id: i32,
    pub game_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
    pub title: String,
    pub platform: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderWithUser {
    pub order_id: i32,
    pub user_id: i32,
    pub username: String,
    pub order_date: DateTime<Utc>,
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub user_id: Option<i32>,
    pub cart_id: Option<i32>,
    pub payment_id: Option<i32>,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct OrderDetailsResponse {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub payment: Option<Payment>,
}
