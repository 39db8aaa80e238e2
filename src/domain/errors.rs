use thiserror::Error;

use super::status::OrderStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Cannot move order from '{from}' to '{to}'")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Forecast failed: {0}")]
    Computation(String),
    #[error("Internal error: {0}")]
    Internal(String),
    /// The store cancelled the work after its statement timeout and rolled
    /// back.
    #[error("Timed out: {0}")]
    Timeout(String),
}

impl DomainError {
    pub fn order_not_found() -> Self {
        DomainError::NotFound("Order not found".to_string())
    }

    pub fn invalid_date() -> Self {
        DomainError::Validation("Invalid date format. Please use YYYY-MM-DD.".to_string())
    }
}
