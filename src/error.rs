use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Database(String),
    Sqlx(sqlx::Error),
    /// Malformed or missing input, detected before any storage call
    Validation(String),
    NotFound(String),
    /// Uniqueness violation reported by the store
    Conflict(String),
    /// Foreign key violation, only reachable when the store enforces them
    InvalidReference(String),
    Internal(String),
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Sqlx(e) => write!(f, "SQLite error: {}", e),
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::NotFound(e) => write!(f, "Not found: {}", e),
            AppError::Conflict(e) => write!(f, "Conflict: {}", e),
            AppError::InvalidReference(e) => write!(f, "Invalid reference: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Sqlx(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Sqlx(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Builds the error body shared by every failing endpoint.
///
/// `error` is the machine-checkable category, `status` mirrors the HTTP code
/// and `detail` is the human-readable message.
pub fn error_response(
    status_code: StatusCode,
    category: &str,
    detail: &str,
) -> (StatusCode, Json<serde_json::Value>) {
    let status_str = status_code.as_u16().to_string();
    (
        status_code,
        Json(json!({
            "error": category,
            "status": status_str,
            "detail": detail
        })),
    )
}

impl AppError {
    /// Category string reported in the `error` field of the response body
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::InvalidReference(_) => "invalid_reference",
            AppError::Database(_)
            | AppError::Sqlx(_)
            | AppError::Internal(_)
            | AppError::Configuration(_) => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> (StatusCode, Json<serde_json::Value>) {
        let status = self.status_code();
        let detail = match self {
            AppError::Validation(e)
            | AppError::NotFound(e)
            | AppError::Conflict(e)
            | AppError::InvalidReference(e) => e.clone(),
            other => {
                tracing::error!(error = %other, "request failed with a server error");
                other.to_string()
            }
        };

        error_response(status, self.category(), &detail)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_have_distinct_categories() {
        let validation = AppError::Validation("bad phone".to_string());
        let not_found = AppError::NotFound("Customer not found".to_string());
        let conflict = AppError::Conflict("duplicate phone".to_string());

        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(conflict.status_code(), StatusCode::BAD_REQUEST);

        assert_eq!(validation.category(), "validation");
        assert_eq!(not_found.category(), "not_found");
        assert_eq!(conflict.category(), "conflict");
    }

    #[test]
    fn test_error_body_shape() {
        let (status, Json(body)) = AppError::NotFound("Item not found".to_string()).to_response();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["status"], "404");
        assert_eq!(body["detail"], "Item not found");
    }

    #[test]
    fn test_storage_errors_are_server_errors() {
        let err = AppError::Sqlx(sqlx::Error::RowNotFound);
        let (status, Json(body)) = err.to_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal");
        assert!(body["detail"].as_str().unwrap().contains("SQLite error"));
    }
}
