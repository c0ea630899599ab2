use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::models::cart::{AddToCart, Cart, CartItemDetail, CartResponse, UpdateCartItem};
use crate::models::user::Claims;
use crate::state::AppState;

pub async fn get_cart_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<CartResponse>> {
    let cart = sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;

    let Some(cart) = cart else {
        return Ok(Json(CartResponse { cart: None, items: Vec::new() }));
    };

    // Join with games so line items carry title and the current price
    let items = sqlx::query_as::<_, CartItemDetail>(
        r#"
        SELECT ci.cart_item_id, ci.cart_id, ci.game_id, ci.quantity, ci.added_at,
               g.title, g.price AS unit_price, g.platform, gi.image_url
        FROM cart_items ci
        JOIN games g ON ci.game_id = g.game_id
        LEFT JOIN game_images gi ON g.game_id = gi.game_id AND gi.is_primary = TRUE
        WHERE ci.cart_id = $1
        "#,
    )
    .bind(cart.cart_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(CartResponse { cart: Some(cart), items }))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToCart>,
) -> Result<(StatusCode, Json<Value>)> {
    let user_id = payload
        .user_id
        .or_else(|| claims.user_id())
        .ok_or_else(|| AppError::invalid_data("User ID is required"))?;

    // Get or create the user's cart
    let cart_id = match sqlx::query_scalar::<_, i32>("SELECT cart_id FROM carts WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
    {
        Some(cart_id) => cart_id,
        None => {
            sqlx::query_scalar::<_, i32>(
                "INSERT INTO carts (user_id, created_at, updated_at) VALUES ($1, NOW(), NOW()) RETURNING cart_id",
            )
            .bind(user_id)
            .fetch_one(&state.db)
            .await?
        }
    };

    // Re-adding a game increments its quantity instead of duplicating the row
    let existing = sqlx::query_scalar::<_, i32>(
        "SELECT quantity FROM cart_items WHERE cart_id = $1 AND game_id = $2",
    )
    .bind(cart_id)
    .bind(payload.game_id)
    .fetch_optional(&state.db)
    .await?;

    match existing {
        Some(current_quantity) => {
            sqlx::query(
                "UPDATE cart_items SET quantity = $1, updated_at = NOW() WHERE cart_id = $2 AND game_id = $3",
            )
            .bind(current_quantity + payload.quantity)
            .bind(cart_id)
            .bind(payload.game_id)
            .execute(&state.db)
            .await?;
        }
        None => {
            sqlx::query(
                "INSERT INTO cart_items (cart_id, game_id, quantity, added_at, updated_at) VALUES ($1, $2, $3, NOW(), NOW())",
            )
            .bind(cart_id)
            .bind(payload.game_id)
            .bind(payload.quantity)
            .execute(&state.db)
            .await?;
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Item added to cart" })),
    ))
}

pub async fn update_cart_item(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCartItem>,
) -> Result<Json<Value>> {
    sqlx::query("UPDATE cart_items SET quantity = $1, updated_at = NOW() WHERE cart_item_id = $2")
        .bind(payload.quantity)
        .bind(payload.cart_item_id)
        .execute(&state.db)
        .await?;

    // Touch the owning cart as well
    sqlx::query(
        r#"
        UPDATE carts
        SET updated_at = NOW()
        WHERE cart_id = (SELECT cart_id FROM cart_items WHERE cart_item_id = $1)
        "#,
    )
    .bind(payload.cart_item_id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "message": "Cart item updated successfully" })))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(cart_item_id): Path<i32>,
) -> Result<Json<Value>> {
    sqlx::query("DELETE FROM cart_items WHERE cart_item_id = $1")
        .bind(cart_item_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Item removed from cart" })))
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(_user_id): Path<i32>,
) -> Result<Json<Value>> {
    // The authenticated user's cart is cleared, not the path parameter's
    let user_id = claims.user_id().ok_or(AppError::AuthError)?;

    sqlx::query(
        "DELETE FROM cart_items WHERE cart_id IN (SELECT cart_id FROM carts WHERE user_id = $1)",
    )
    .bind(user_id)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "message": "Cart cleared" })))
}
