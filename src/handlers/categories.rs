use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::models::category::{Category, CategoryPayload};
use crate::state::AppState;

pub async fn get_all_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::invalid_data("Category name is required"));
    }

    // Check for duplicate name
    let existing = sqlx::query_scalar::<_, i32>("SELECT category_id FROM categories WHERE name = $1")
        .bind(&payload.name)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::invalid_data("Category already exists"));
    }

    let category_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO categories (name) VALUES ($1) RETURNING category_id",
    )
    .bind(&payload.name)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Category created successfully",
            "category_id": category_id,
        })),
    ))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Value>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::invalid_data("Category name is required"));
    }

    let existing = sqlx::query_scalar::<_, i32>("SELECT category_id FROM categories WHERE category_id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_none() {
        return Err(AppError::DocumentNotFound);
    }

    sqlx::query("UPDATE categories SET name = $1 WHERE category_id = $2")
        .bind(&payload.name)
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Category updated successfully" })))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let existing = sqlx::query_scalar::<_, i32>("SELECT category_id FROM categories WHERE category_id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_none() {
        return Err(AppError::DocumentNotFound);
    }

    sqlx::query("DELETE FROM categories WHERE category_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
