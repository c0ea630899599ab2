use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::user::Claims;
use crate::state::AppState;

pub async fn get_reviews_for_game(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<Json<Vec<Review>>> {
    let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE game_id = $1")
        .bind(game_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(reviews))
}

pub async fn get_review_by_id(
    State(state): State<AppState>,
    Path(review_id): Path<i32>,
) -> Result<Json<Review>> {
    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE review_id = $1")
        .bind(review_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::DocumentNotFound)?;

    Ok(Json(review))
}

pub async fn add_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateReview>,
) -> Result<(StatusCode, Json<Value>)> {
    payload.validate()?;

    let user_id = claims.user_id().ok_or(AppError::AuthError)?;

    sqlx::query(
        r#"
        INSERT INTO reviews (user_id, game_id, rating, comment, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        "#,
    )
    .bind(user_id)
    .bind(payload.game_id)
    .bind(payload.rating)
    .bind(&payload.comment)
    .execute(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Review added successfully" })),
    ))
}

pub async fn update_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(review_id): Path<i32>,
    Json(payload): Json<UpdateReview>,
) -> Result<Json<Value>> {
    payload.validate()?;

    let user_id = claims.user_id().ok_or(AppError::AuthError)?;

    // Only the author may edit their review
    let owned = sqlx::query_scalar::<_, i32>(
        "SELECT review_id FROM reviews WHERE review_id = $1 AND user_id = $2",
    )
    .bind(review_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    if owned.is_none() {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("UPDATE reviews SET rating = $1, comment = $2, updated_at = NOW() WHERE review_id = $3")
        .bind(payload.rating)
        .bind(&payload.comment)
        .bind(review_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Review updated successfully" })))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(review_id): Path<i32>,
) -> Result<Json<Value>> {
    let user_id = claims.user_id().ok_or(AppError::AuthError)?;

    let owned = sqlx::query_scalar::<_, i32>(
        "SELECT review_id FROM reviews WHERE review_id = $1 AND user_id = $2",
    )
    .bind(review_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    if owned.is_none() {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("DELETE FROM reviews WHERE review_id = $1")
        .bind(review_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Review deleted successfully" })))
}
