use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::users;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::get_all_users))
        .route("/", post(users::create_user))
        .route("/:id", get(users::get_user_by_id))
        .route("/:id", put(users::update_user))
        .route("/:id", delete(users::delete_user))
        .layer(from_fn(auth_middleware))
}
