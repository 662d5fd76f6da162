use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load template {path:?}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image not found")]
    ImageNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Io(ref e) => {
                tracing::error!("I/O error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::TemplateLoad {
                ref path,
                ref source,
            } => {
                tracing::error!("Template {:?} could not be read: {}", path, source);
                (StatusCode::INTERNAL_SERVER_ERROR, "Page template unavailable")
            }
            AppError::ImageNotFound => (StatusCode::NOT_FOUND, "Image not found"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            AppError::InvalidInput(ref msg) => {
                tracing::warn!("Rejected input: {}", msg);
                (StatusCode::BAD_REQUEST, msg.as_str())
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid("username cannot be empty")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ImageNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let missing = AppError::TemplateLoad {
            path: PathBuf::from("templates/photos.html"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(
            missing.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
