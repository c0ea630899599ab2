use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub category_id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}
