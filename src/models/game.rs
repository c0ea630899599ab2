use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Catalog entity. `image_url` is the primary image joined in at read time;
// `price` is nullable and contributes zero to checkout when missing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Game {
    pub game_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: i32,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_url: Option<String>,
}

// For creating and updating games
#[derive(Debug, Deserialize)]
pub struct GamePayload {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub is_featured: Option<bool>,
    pub image_url: Option<String>,
}

// For query parameters
#[derive(Debug, Deserialize)]
pub struct GameQuery {
    pub sort: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<String>,
}
