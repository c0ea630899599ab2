use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::cart;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id", get(cart::get_cart_by_user))
        .route("/add", post(cart::add_to_cart))
        .route("/update", put(cart::update_cart_item))
        .route("/remove/:cart_item_id", delete(cart::remove_from_cart))
        .route("/:user_id/clear", delete(cart::clear_cart))
        .layer(from_fn(auth_middleware))
}
