use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::models::user::{UpdateUser, UserResponse};
use crate::state::AppState;

pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = sqlx::query_as::<_, UserResponse>(
        "SELECT user_id, username, email, is_verified, is_active FROM users",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(users))
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>> {
    let user = sqlx::query_as::<_, UserResponse>(
        "SELECT user_id, username, email, is_verified, is_active FROM users WHERE user_id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::DocumentNotFound)?;

    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<Value>)> {
    let password_hash = hash(&payload.password, DEFAULT_COST)?;

    let user_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO users (username, email, password_hash, is_verified, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, FALSE, TRUE, NOW(), NOW())
        RETURNING user_id
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "user_id": user_id }))))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<Value>> {
    let email = payload
        .email
        .as_deref()
        .ok_or_else(|| AppError::invalid_data("Email is required."))?;

    if let (Some(current), Some(new)) = (&payload.current_password, &payload.new_password) {
        let stored_hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::DocumentNotFound)?;

        if !verify(current, &stored_hash)? {
            return Err(AppError::invalid_data("Invalid Password"));
        }

        let new_hash = hash(new, DEFAULT_COST)?;
        sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($1, username), email = $2, password_hash = $3, updated_at = NOW()
            WHERE user_id = $4
            "#,
        )
        .bind(&payload.username)
        .bind(email)
        .bind(&new_hash)
        .bind(id)
        .execute(&state.db)
        .await?;
    } else {
        sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($1, username), email = $2, updated_at = NOW()
            WHERE user_id = $3
            "#,
        )
        .bind(&payload.username)
        .bind(email)
        .bind(id)
        .execute(&state.db)
        .await?;
    }

    Ok(Json(json!({ "message": "User updated successfully" })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
