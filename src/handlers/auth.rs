use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    Extension,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::user::{AuthResponse, Claims, LoginUser, RegisterUser, UserResponse, UserWithRole};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUser>,
) -> Result<(StatusCode, Json<Value>)> {
    payload.validate()?;

    // Check if email already exists
    let email_taken = sqlx::query_scalar::<_, i32>("SELECT user_id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await?;
    if email_taken.is_some() {
        return Err(AppError::invalid_data("Email already in use"));
    }

    // Check if username already exists
    let username_taken = sqlx::query_scalar::<_, i32>("SELECT user_id FROM users WHERE username = $1")
        .bind(&payload.username)
        .fetch_optional(&state.db)
        .await?;
    if username_taken.is_some() {
        return Err(AppError::invalid_data("Username already taken"));
    }

    // Hash password
    let password_hash = hash(&payload.password, DEFAULT_COST)?;

    // New accounts get the Customer role in the same transaction
    let mut tx = state.db.begin().await?;

    let user_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO users (username, email, password_hash, is_verified, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, FALSE, TRUE, NOW(), NOW())
        RETURNING user_id
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id) SELECT $1, role_id FROM roles WHERE name = 'Customer'",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user_id": user_id,
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<AuthResponse>> {
    let user = sqlx::query_as::<_, crate::models::user::UserAuthRow>(
        r#"
        SELECT u.user_id, u.username, u.email, u.password_hash,
               u.is_verified, u.is_active, u.created_at, r.name AS role_name
        FROM users u
        LEFT JOIN user_roles ur ON u.user_id = ur.user_id
        LEFT JOIN roles r ON ur.role_id = r.role_id
        WHERE u.email = $1
        "#,
    )
    .bind(&payload.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::invalid_data("Invalid credentials"))?;

    // Verify password
    let valid = verify(&payload.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::invalid_data("Invalid Password"));
    }

    let role = user.role_name.clone().unwrap_or_else(|| "Customer".to_string());

    // Generate JWT token
    let claims = Claims {
        sub: user.user_id.to_string(),
        username: user.username.clone(),
        role,
        exp: (Utc::now().timestamp() + 86400) as usize, // 24 hours
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_ref()),
    )?;

    Ok(Json(AuthResponse {
        user: UserWithRole {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
            is_active: user.is_active,
            created_at: user.created_at,
            role_name: user.role_name,
        },
        token,
    }))
}

pub async fn logout() -> Json<Value> {
    // Token-based auth: the client discards the token
    Json(json!({ "message": "Logged out successfully" }))
}

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>> {
    let user_id = claims.user_id().ok_or(AppError::AuthError)?;

    let user = sqlx::query_as::<_, UserResponse>(
        "SELECT user_id, username, email, is_verified, is_active FROM users WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::DocumentNotFound)?;

    Ok(Json(user))
}
