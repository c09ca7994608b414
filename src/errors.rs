use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Migrate(sqlx::migrate::MigrateError),
    /// Malformed or out-of-range input; the payload lists what was wrong.
    Validation(String),
    NotFound,
}

/// JSON error body returned by every API endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: &str) -> Self {
        ApiErrorResponse {
            error: error.to_string(),
            details: None,
        }
    }

    pub fn with_details(error: &str, details: impl Into<String>) -> Self {
        ApiErrorResponse {
            error: error.to_string(),
            details: Some(details.into()),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Migrate(e) => write!(f, "Migration error: {e}"),
            AppError::Validation(e) => write!(f, "Validation failed: {e}"),
            AppError::NotFound => write!(f, "Slide not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => {
                HttpResponse::NotFound().json(ApiErrorResponse::new("Slide not found"))
            }
            AppError::Validation(details) => HttpResponse::BadRequest()
                .json(ApiErrorResponse::with_details("Validation failed", details.clone())),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(ApiErrorResponse::new("Internal server error"))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Migrate(e)
    }
}
