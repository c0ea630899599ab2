// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid cart items or prices")]
    InvalidCart,

    #[error("Document not found")]
    DocumentNotFound,

    #[error("Duplicate key error")]
    DuplicateKey,

    #[error("Authentication error")]
    AuthError,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Service error: {0}")]
    ServiceError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()),
            AppError::Migration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()),
            AppError::ValidationError(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            AppError::EmptyCart => (StatusCode::BAD_REQUEST, "Cart is empty".to_string()),
            AppError::InvalidCart => (StatusCode::BAD_REQUEST, "Invalid cart items or prices".to_string()),
            AppError::DocumentNotFound => (StatusCode::NOT_FOUND, "Document not found".to_string()),
            AppError::DuplicateKey => (StatusCode::CONFLICT, "Duplicate entry".to_string()),
            AppError::AuthError => (StatusCode::UNAUTHORIZED, "Authentication failed".to_string()),
            AppError::Unauthorized => (StatusCode::FORBIDDEN, "Unauthorized access".to_string()),
            AppError::ServiceError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Service error".to_string()),
        };

        // Internal detail is logged server-side, never echoed to the caller.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        }

        let body = Json(json!({
            "error": error_message,
            "message": self.public_message(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

// Manual From implementations
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ValidationError(format!("JSON parsing error: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_err: jsonwebtoken::errors::Error) -> Self {
        AppError::AuthError
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::ServiceError(format!("Password hashing failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        AppError::ServiceError(msg.into())
    }

    // 5xx variants carry driver detail that must not leak to the wire
    fn public_message(&self) -> String {
        match self {
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::ServiceError(_) => "Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(status_of(AppError::invalid_data("User ID is required")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::EmptyCart), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::InvalidCart), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_documents_are_not_found() {
        assert_eq!(status_of(AppError::DocumentNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_failures_map_to_401_and_403() {
        assert_eq!(status_of(AppError::AuthError), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_failures_are_generic_server_errors() {
        assert_eq!(status_of(AppError::Database(sqlx::Error::PoolClosed)), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(AppError::service("boom")), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
