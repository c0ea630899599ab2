use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::categories;
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new().route("/", get(categories::get_all_categories));

    let protected = Router::new()
        .route("/", post(categories::create_category))
        .route("/:id", put(categories::update_category))
        .route("/:id", delete(categories::delete_category))
        .layer(from_fn(require_admin))
        .layer(from_fn(auth_middleware));

    public.merge(protected)
}
