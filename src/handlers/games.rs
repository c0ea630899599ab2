use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::models::game::{Game, GamePayload, GameQuery};
use crate::state::AppState;

const GAME_COLUMNS: &str = r#"
    SELECT g.*, gi.image_url
    FROM games g
    LEFT JOIN game_images gi ON g.game_id = gi.game_id AND gi.is_primary = TRUE
"#;

pub async fn get_games(
    State(state): State<AppState>,
    Query(query): Query<GameQuery>,
) -> Result<Json<Vec<Game>>> {
    let mut sql = format!("{} WHERE 1=1", GAME_COLUMNS);
    let mut params: Vec<&str> = Vec::new();

    // Add filters if specified
    if let Some(genre) = &query.genre {
        params.push(genre);
        sql.push_str(&format!(" AND g.genre = ${}", params.len()));
    }
    if let Some(platform) = &query.platform {
        params.push(platform);
        sql.push_str(&format!(" AND g.platform = ${}", params.len()));
    }

    // Default sort is featured first, then newest
    match query.sort.as_deref() {
        Some("price_asc") => sql.push_str(" ORDER BY g.price ASC"),
        Some("price_desc") => sql.push_str(" ORDER BY g.price DESC"),
        Some("release_date_desc") => sql.push_str(" ORDER BY g.release_date DESC"),
        Some("title_asc") => sql.push_str(" ORDER BY g.title ASC"),
        _ => sql.push_str(" ORDER BY g.is_featured DESC, g.game_id DESC"),
    }

    let mut q = sqlx::query_as::<_, Game>(&sql);
    for param in params {
        q = q.bind(param);
    }

    let games = q.fetch_all(&state.db).await?;
    Ok(Json(games))
}

pub async fn get_game_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Game>> {
    let sql = format!("{} WHERE g.game_id = $1", GAME_COLUMNS);

    let game = sqlx::query_as::<_, Game>(&sql)
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::DocumentNotFound)?;

    Ok(Json(game))
}

pub async fn get_games_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<Game>>> {
    let sql = format!(
        "{} JOIN game_categories gc ON g.game_id = gc.game_id WHERE gc.category_id = $1",
        GAME_COLUMNS
    );

    let games = sqlx::query_as::<_, Game>(&sql)
        .bind(category_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(games))
}

pub async fn get_genres(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let genres = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT genre FROM games WHERE genre IS NOT NULL ORDER BY genre",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(genres))
}

pub async fn get_platforms(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let platforms = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT platform FROM games WHERE platform IS NOT NULL ORDER BY platform",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(platforms))
}

pub async fn create_game(
    State(state): State<AppState>,
    Json(payload): Json<GamePayload>,
) -> Result<(StatusCode, Json<Value>)> {
    sqlx::query(
        r#"
        INSERT INTO games (title, description, price, stock_quantity, developer, publisher,
                           release_date, platform, genre, is_featured, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(payload.stock_quantity.unwrap_or(0))
    .bind(&payload.developer)
    .bind(&payload.publisher)
    .bind(payload.release_date)
    .bind(&payload.platform)
    .bind(&payload.genre)
    .bind(payload.is_featured.unwrap_or(false))
    .execute(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Game created successfully" })),
    ))
}

pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<GamePayload>,
) -> Result<Json<Value>> {
    sqlx::query(
        r#"
        UPDATE games
        SET title = $1, description = $2, price = $3, genre = $4, platform = $5,
            developer = $6, release_date = $7, is_featured = $8, updated_at = NOW()
        WHERE game_id = $9
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.price)
    .bind(&payload.genre)
    .bind(&payload.platform)
    .bind(&payload.developer)
    .bind(payload.release_date)
    .bind(payload.is_featured.unwrap_or(false))
    .bind(id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "message": "Game updated successfully" })))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    sqlx::query("DELETE FROM games WHERE game_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Game deleted successfully" })))
}
