use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::games;
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(games::get_games))
        .route("/genres", get(games::get_genres))
        .route("/platforms", get(games::get_platforms))
        .route("/category/:category_id", get(games::get_games_by_category))
        .route("/:id", get(games::get_game_by_id));

    // Catalog writes are admin-only; auth runs first
    let protected = Router::new()
        .route("/", post(games::create_game))
        .route("/:id", put(games::update_game))
        .route("/:id", delete(games::delete_game))
        .layer(from_fn(require_admin))
        .layer(from_fn(auth_middleware));

    public.merge(protected)
}
