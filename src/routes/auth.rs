use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};

use crate::handlers::auth;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    let protected = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(from_fn(auth_middleware));

    public.merge(protected)
}
