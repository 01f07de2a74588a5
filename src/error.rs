//! Error types for Toolcrib server

use axum::{
    extract::rejection::JsonRejection,
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable application error codes carried in every error response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    BadValue = 3,
    NoSuchRecord = 4,
    InsufficientAvailability = 5,
    RetryLater = 6,
    LoanBalanceExceeded = 7,
    NotCheckoutable = 8,
    HasActiveLoans = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient availability: {0}")]
    InsufficientAvailability(String),

    #[error("{0}")]
    ExceedsLoanBalance(String),

    #[error("{0}")]
    NotCheckoutable(String),

    #[error("{0}")]
    HasActiveLoans(String),

    #[error("Retryable: {0}")]
    Retryable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Lock-wait timeouts, serialization failures and deadlocks are
        // transient: the transaction rolled back and the caller may retry.
        if let sqlx::Error::Database(db) = &err {
            if let Some(code) = db.code() {
                if matches!(code.as_ref(), "55P03" | "40001" | "40P01") {
                    return AppError::Retryable(db.message().to_string());
                }
            }
        }
        AppError::Database(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord),
            AppError::InsufficientAvailability(_) => {
                (StatusCode::CONFLICT, ErrorCode::InsufficientAvailability)
            }
            AppError::ExceedsLoanBalance(_) => {
                (StatusCode::CONFLICT, ErrorCode::LoanBalanceExceeded)
            }
            AppError::NotCheckoutable(_) => {
                (StatusCode::CONFLICT, ErrorCode::NotCheckoutable)
            }
            AppError::HasActiveLoans(_) => {
                (StatusCode::CONFLICT, ErrorCode::HasActiveLoans)
            }
            AppError::Retryable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::RetryLater)
            }
            AppError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure)
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return (status, [(RETRY_AFTER, "1")], body).into_response();
        }

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_distinct_statuses() {
        let cases = [
            (AppError::Validation("q".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::InsufficientAvailability("c".into()),
                StatusCode::CONFLICT,
            ),
            (AppError::Retryable("t".into()), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::Internal("i".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_and_code().0, expected);
        }
    }

    #[test]
    fn conflict_causes_carry_distinct_codes() {
        let cases = [
            (
                AppError::InsufficientAvailability("a".into()),
                ErrorCode::InsufficientAvailability,
            ),
            (
                AppError::ExceedsLoanBalance("b".into()),
                ErrorCode::LoanBalanceExceeded,
            ),
            (AppError::NotCheckoutable("c".into()), ErrorCode::NotCheckoutable),
            (AppError::HasActiveLoans("d".into()), ErrorCode::HasActiveLoans),
        ];
        for (err, expected) in cases {
            let (status, code) = err.status_and_code();
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(code, expected);
        }
    }
}
