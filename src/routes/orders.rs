use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};

use crate::handlers::orders;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::get_all_orders))
        .route("/", post(orders::place_order))
        .route("/payment", post(orders::process_payment))
        .route("/details/:order_id", get(orders::get_order_details))
        .route("/status/:order_id", put(orders::update_order_status))
        .route("/:user_id", get(orders::get_orders_by_user))
        .layer(from_fn(auth_middleware))
}
