use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::ERR_INVALID_CREDENTIALS;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Storage failure; `context` is the only part shown to clients
    #[error("{context}")]
    Database {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid form data")]
    Validation(Vec<FieldError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request body or query string that could not be extracted
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Invoice not found")]
    InvoiceNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl AppError {
    /// Build a mapper that logs a storage failure and wraps it with the
    /// operation's public message.
    pub fn database(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| {
            tracing::error!("Database Error: {:?}", source);
            AppError::Database { context, source }
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database { context, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": context }))
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Validation(ref fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing Fields. Failed to save invoice.",
                    "fields": fields,
                }),
            ),
            AppError::InvalidInput(ref msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Rejected { status, ref message } => {
                tracing::warn!("Rejected request: {}", message);
                (status, json!({ "error": message }))
            }
            AppError::InvoiceNotFound => {
                (StatusCode::NOT_FOUND, json!({ "error": "Invoice not found" }))
            }
            AppError::UserNotFound | AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": ERR_INVALID_CREDENTIALS }),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            AppError::Crypto(ref e) => {
                tracing::error!("Crypto error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_hides_source() {
        let err = AppError::database("Failed to fetch revenue data.")(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "Failed to fetch revenue data.");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(vec![FieldError::new("status", "bad")])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvoiceNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UserNotFound.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_rejection_keeps_status() {
        let err = AppError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Form requests must have `Content-Type: application/x-www-form-urlencoded`"
                .to_string(),
        };
        assert!(err.to_string().starts_with("Form requests"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
