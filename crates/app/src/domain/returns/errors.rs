//! Returns service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    orders::models::OrderId, returns::models::ReturnStatus, validation::ValidationError,
};

#[derive(Debug, Error)]
pub enum ReturnsServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("no return request for order {0}")]
    ReturnNotFound(OrderId),

    #[error("no matching return requests")]
    NoReturns,

    #[error("cannot move a return from {from} to {to}")]
    InvalidTransition { from: ReturnStatus, to: ReturnStatus },

    /// Completion requires an approved request.
    #[error("return is {0}, not approved")]
    NotApproved(ReturnStatus),

    #[error("a return request already exists for this order")]
    AlreadyExists,

    #[error("return request not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReturnsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
