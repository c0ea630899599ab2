use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::admin;
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/users", get(admin::get_all_users))
        .route("/user/role", put(admin::update_user_role))
        .route("/permissions", post(admin::assign_permission_to_role))
        // Order management
        .route("/orders", get(admin::get_all_orders))
        // Game management
        .route("/games", get(admin::get_all_games))
        .route("/games", post(admin::add_game))
        .route("/games/:game_id", put(admin::update_game))
        .route("/games/:game_id", delete(admin::delete_game))
        // Dashboard and reports
        .route("/dashboard", get(admin::get_dashboard_stats))
        .route("/reports/sales", get(admin::get_sales_report))
        .route("/reports/users", get(admin::get_users_report))
        // Admin role required on every route; auth runs first
        .layer(from_fn(require_admin))
        .layer(from_fn(auth_middleware))
}
