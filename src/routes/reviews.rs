use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::reviews;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/game/:game_id", get(reviews::get_reviews_for_game))
        .route("/:review_id", get(reviews::get_review_by_id));

    let protected = Router::new()
        .route("/", post(reviews::add_review))
        .route("/:review_id", put(reviews::update_review))
        .route("/:review_id", delete(reviews::delete_review))
        .layer(from_fn(auth_middleware));

    public.merge(protected)
}
