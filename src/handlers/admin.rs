use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::Result;
use crate::models::game::{Game, GamePayload};
use crate::models::user::UserWithRole;
use crate::state::AppState;

pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<UserWithRole>>> {
    let users = sqlx::query_as::<_, UserWithRole>(
        r#"
        SELECT u.user_id, u.username, u.email, u.is_verified, u.is_active, u.created_at,
               r.name AS role_name
        FROM users u
        LEFT JOIN user_roles ur ON u.user_id = ur.user_id
        LEFT JOIN roles r ON ur.role_id = r.role_id
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRole {
    pub user_id: i32,
    pub role_id: i32,
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRole>,
) -> Result<Json<Value>> {
    // Insert or replace the user's single role assignment
    let existing = sqlx::query_scalar::<_, i32>("SELECT role_id FROM user_roles WHERE user_id = $1")
        .bind(payload.user_id)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        sqlx::query("UPDATE user_roles SET role_id = $1 WHERE user_id = $2")
            .bind(payload.role_id)
            .bind(payload.user_id)
            .execute(&state.db)
            .await?;
    } else {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(payload.user_id)
            .bind(payload.role_id)
            .execute(&state.db)
            .await?;
    }

    Ok(Json(json!({ "message": "User role updated" })))
}

#[derive(Debug, Deserialize)]
pub struct AssignPermission {
    pub role_id: i32,
    pub permission_id: i32,
}

pub async fn assign_permission_to_role(
    State(state): State<AppState>,
    Json(payload): Json<AssignPermission>,
) -> Result<(StatusCode, Json<Value>)> {
    sqlx::query("INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)")
        .bind(payload.role_id)
        .bind(payload.permission_id)
        .execute(&state.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => crate::errors::AppError::DuplicateKey,
            _ => e.into(),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Permission assigned to role successfully" })),
    ))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AdminOrderRow {
    pub order_id: i32,
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub order_date: DateTime<Utc>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

pub async fn get_all_orders(State(state): State<AppState>) -> Result<Json<Vec<AdminOrderRow>>> {
    let orders = sqlx::query_as::<_, AdminOrderRow>(
        r#"
        SELECT o.order_id, o.user_id, u.username, u.email, o.order_date,
               o.subtotal, o.tax_amount, o.shipping_cost, o.total_amount,
               o.status, o.updated_at
        FROM orders o
        JOIN users u ON o.user_id = u.user_id
        ORDER BY o.order_date DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(orders))
}

pub async fn get_all_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>> {
    let games = sqlx::query_as::<_, Game>(
        r#"
        SELECT g.*, gi.image_url
        FROM games g
        LEFT JOIN game_images gi ON g.game_id = gi.game_id AND gi.is_primary = TRUE
        ORDER BY g.title
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(games))
}

pub async fn add_game(
    State(state): State<AppState>,
    Json(payload): Json<GamePayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let mut tx = state.db.begin().await?;

    let game_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO games (title, description, price, stock_quantity, developer, publisher,
                           release_date, platform, genre, is_featured, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
        RETURNING game_id
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
    .fetch_one(&mut *tx)
    .await?;

    // Insert image if provided
    if let Some(image_url) = &payload.image_url {
        sqlx::query(
            "INSERT INTO game_images (game_id, image_url, is_primary, created_at) VALUES ($1, $2, TRUE, NOW())",
        )
        .bind(game_id)
        .bind(image_url)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Game added successfully",
            "game_id": game_id,
        })),
    ))
}

pub async fn update_game(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    Json(payload): Json<GamePayload>,
) -> Result<Json<Value>> {
    sqlx::query(
        r#"
        UPDATE games
        SET title = $1,
            description = $2,
            price = $3,
            stock_quantity = $4,
            developer = $5,
            publisher = $6,
            release_date = $7,
            platform = $8,
            genre = $9,
            is_featured = $10,
            updated_at = NOW()
        WHERE game_id = $11
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
    .bind(game_id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "message": "Game updated successfully" })))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<Json<Value>> {
    let mut tx = state.db.begin().await?;

    // Delete game images first (foreign key constraint)
    sqlx::query("DELETE FROM game_images WHERE game_id = $1")
        .bind(game_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM games WHERE game_id = $1")
        .bind(game_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Json(json!({ "message": "Game deleted successfully" })))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RecentOrder {
    pub order_id: i32,
    pub user_id: i32,
    pub username: String,
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
    pub status: String,
}

pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<Json<Value>> {
    let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db)
        .await?;

    let total_orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
        .fetch_one(&state.db)
        .await?;

    let total_revenue = sqlx::query_scalar::<_, Option<f64>>("SELECT SUM(total_amount) FROM orders")
        .fetch_one(&state.db)
        .await?
        .unwrap_or(0.0);

    let recent_activity = sqlx::query_as::<_, RecentOrder>(
        r#"
        SELECT o.order_id, o.user_id, u.username, o.order_date, o.total_amount, o.status
        FROM orders o
        JOIN users u ON o.user_id = u.user_id
        ORDER BY o.order_date DESC
        LIMIT 5
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "totalUsers": total_users,
        "totalOrders": total_orders,
        "totalRevenue": total_revenue,
        "recentActivity": recent_activity,
    })))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DailySales {
    pub date: NaiveDate,
    #[serde(rename = "orderCount")]
    pub order_count: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TopGame {
    pub game_id: i32,
    pub title: String,
    pub platform: Option<String>,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: i64,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

pub async fn get_sales_report(State(state): State<AppState>) -> Result<Json<Value>> {
    // Daily sales for the last 30 days
    let daily_sales = sqlx::query_as::<_, DailySales>(
        r#"
        SELECT order_date::date AS date,
               COUNT(order_id) AS order_count,
               SUM(total_amount) AS revenue
        FROM orders
        WHERE order_date >= NOW() - INTERVAL '30 days'
        GROUP BY order_date::date
        ORDER BY date
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    // Top selling games
    let top_games = sqlx::query_as::<_, TopGame>(
        r#"
        SELECT g.game_id, g.title, g.platform,
               SUM(oi.quantity) AS total_quantity,
               SUM(oi.subtotal) AS total_revenue
        FROM order_items oi
        JOIN games g ON oi.game_id = g.game_id
        JOIN orders o ON oi.order_id = o.order_id
        GROUP BY g.game_id, g.title, g.platform
        ORDER BY total_quantity DESC
        LIMIT 10
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "dailySales": daily_sales,
        "topGames": top_games,
    })))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct NewUsersPerDay {
    pub date: NaiveDate,
    #[serde(rename = "userCount")]
    pub user_count: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TopUser {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    #[serde(rename = "orderCount")]
    pub order_count: i64,
    #[serde(rename = "totalSpent")]
    pub total_spent: f64,
}

pub async fn get_users_report(State(state): State<AppState>) -> Result<Json<Value>> {
    // New users per day for the last 30 days
    let new_users = sqlx::query_as::<_, NewUsersPerDay>(
        r#"
        SELECT created_at::date AS date,
               COUNT(user_id) AS user_count
        FROM users
        WHERE created_at >= NOW() - INTERVAL '30 days'
        GROUP BY created_at::date
        ORDER BY date
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    // Top users by order count
    let top_users = sqlx::query_as::<_, TopUser>(
        r#"
        SELECT u.user_id, u.username, u.email,
               COUNT(o.order_id) AS order_count,
               SUM(o.total_amount) AS total_spent
        FROM users u
        JOIN orders o ON u.user_id = o.user_id
        GROUP BY u.user_id, u.username, u.email
        ORDER BY order_count DESC
        LIMIT 10
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "newUsers": new_users,
        "topUsersByOrders": top_users,
    })))
}
