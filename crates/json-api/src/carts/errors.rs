//! Errors

use octavo_app::domain::carts::CartsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Unavailable => {
            StatusError::bad_request().brief("This copy is not available")
        }
        CartsServiceError::Duplicate => {
            StatusError::bad_request().brief("This copy is already in your cart")
        }
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::NotFound => StatusError::not_found(),
        CartsServiceError::Sql(source) => {
            error!("carts storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
