use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::models::order::{
    Order, OrderDetailsResponse, OrderItemDetail, OrderWithUser, PlaceOrderRequest, UpdateOrderStatus,
};
use crate::models::payment::{Payment, ProcessPaymentRequest};
use crate::services::checkout;
use crate::state::AppState;

pub async fn get_all_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderWithUser>>> {
    let orders = sqlx::query_as::<_, OrderWithUser>(
        r#"
        SELECT o.order_id, o.user_id, u.username, o.order_date,
               o.subtotal, o.shipping_cost, o.total_amount,
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

pub async fn get_orders_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Order>>> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(orders))
}

pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let policy = state.config.checkout_policy();
    let order_id = checkout::place_order(&state.db, &policy, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Order placed successfully",
            "order_id": order_id,
        })),
    ))
}

pub async fn get_order_details(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<OrderDetailsResponse>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_id = $1")
        .bind(order_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::DocumentNotFound)?;

    // Line items with game details
    let items = sqlx::query_as::<_, OrderItemDetail>(
        r#"
        SELECT oi.order_item_id, oi.order_id, oi.game_id, oi.quantity, oi.unit_price, oi.subtotal,
               g.title, g.platform, gi.image_url
        FROM order_items oi
        JOIN games g ON oi.game_id = g.game_id
        LEFT JOIN game_images gi ON g.game_id = gi.game_id AND gi.is_primary = TRUE
        WHERE oi.order_id = $1
        "#,
    )
    .bind(order_id)
    .fetch_all(&state.db)
    .await?;

    let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = $1")
        .bind(order_id)
        .fetch_optional(&state.db)
        .await?;

    Ok(Json(OrderDetailsResponse { order, items, payment }))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderStatus>,
) -> Result<Json<Value>> {
    sqlx::query("UPDATE orders SET status = $1, updated_at = NOW() WHERE order_id = $2")
        .bind(&payload.status)
        .bind(order_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Order status updated successfully" })))
}

pub async fn process_payment(
    State(state): State<AppState>,
    Json(payload): Json<ProcessPaymentRequest>,
) -> Result<Json<Value>> {
    let payment_id = checkout::process_payment(&state.db, &payload).await?;

    Ok(Json(json!({
        "success": true,
        "payment_id": payment_id,
    })))
}
