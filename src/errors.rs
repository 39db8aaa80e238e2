use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors surfaced to HTTP clients as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("An error occurred: {0}")]
    Internal(String),

    #[error("The request timed out")]
    Timeout,
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::InvalidTransition { .. } => AppError::Conflict(e.to_string()),
            DomainError::Computation(_) => AppError::Internal(e.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
            DomainError::Timeout(msg) => {
                log::warn!("store timeout: {}", msg);
                AppError::Timeout
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(serde_json::json!({
            "detail": self.to_string()
        }))
    }
}
