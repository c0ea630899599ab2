use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// One active cart per user. Created lazily on first add-to-cart and never
// deleted; checkout only clears its line items.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Cart {
    pub cart_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Cart line joined with the game's current catalog price
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItemDetail {
    pub cart_item_id: i32,
    pub cart_id: i32,
    pub game_id: i32,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
    pub title: String,
    pub unit_price: Option<f64>,
    pub platform: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Option<Cart>,
    pub items: Vec<CartItemDetail>,
}

#[derive(Debug, Deserialize)]
pub struct AddToCart {
    pub game_id: i32,
    pub quantity: i32,
    pub user_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartItem {
    pub cart_item_id: i32,
    pub quantity: i32,
}
