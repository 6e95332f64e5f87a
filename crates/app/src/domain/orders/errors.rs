//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Checkout requires at least one cart item.
    #[error("cart is empty")]
    EmptyCart,

    /// Shipping address missing, inactive, or not owned by the customer.
    #[error("invalid address")]
    InvalidAddress,

    /// Payment method missing, inactive, or not owned by the customer.
    #[error("invalid payment method")]
    InvalidPayment,

    /// A cart copy was taken before checkout could capture it; the whole
    /// unit rolls back.
    #[error("copy is no longer available")]
    Unavailable,

    #[error("not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            _ => Self::Sql(error),
        }
    }
}
