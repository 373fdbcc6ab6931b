//! Error types for Biblio server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable application error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    BookNotFound = 4,
    LoanNotFound = 5,
    UserNotFound = 6,
    NoCopiesAvailable = 7,
    MaxRenewalsReached = 8,
    InvalidBounds = 9,
    BookHasActiveLoans = 10,
    Duplicate = 11,
    BadValue = 12,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Book with id {0} not found")]
    BookNotFound(i32),

    #[error("Loan with id {0} not found")]
    LoanNotFound(i32),

    #[error("User with id {0} not found")]
    UserNotFound(i32),

    #[error("No copies available for book {0}")]
    NoCopiesAvailable(i32),

    #[error("Maximum renewals reached ({0}/{1})")]
    MaxRenewalsReached(i16, i16),

    #[error("Invalid copy bounds: {0}")]
    InvalidBounds(String),

    #[error("Book {0} still has active loans")]
    BookHasActiveLoans(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            // NotFound family: referenced entity absent
            AppError::BookNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::BookNotFound, self.to_string())
            }
            AppError::LoanNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::LoanNotFound, self.to_string())
            }
            AppError::UserNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::UserNotFound, self.to_string())
            }
            // ValidationRule family: a business rule blocks the transition
            AppError::NoCopiesAvailable(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::NoCopiesAvailable,
                self.to_string(),
            ),
            AppError::MaxRenewalsReached(_, _) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::MaxRenewalsReached,
                self.to_string(),
            ),
            AppError::InvalidBounds(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::InvalidBounds,
                msg.clone(),
            ),
            AppError::BookHasActiveLoans(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::BookHasActiveLoans,
                self.to_string(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone()),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
