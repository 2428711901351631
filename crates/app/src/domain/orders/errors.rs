//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    customers::models::CustomerId, orders::models::OrderId, products::models::ProductId,
    validation::ValidationError,
};

/// Failure while turning a cart into an order. Nothing is persisted when
/// this is returned: the enclosing transaction is rolled back.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("cart is empty")]
    EmptyCart,

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u64,
        available: u64,
    },

    #[error("order total overflows")]
    AmountOverflow,

    #[error("storage error")]
    Sql(#[from] Error),
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("customer has no orders")]
    NoOrders,

    #[error("product {0} is not part of the order")]
    ItemNotFound(ProductId),

    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u64,
        available: u64,
    },

    /// The archived copy was written but the open order could not be removed.
    #[error("order {0} was archived but is still open")]
    IntegrityViolation(OrderId),

    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
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

impl From<Error> for OrdersServiceError {
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
