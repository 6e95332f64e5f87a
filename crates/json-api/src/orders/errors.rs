//! Errors

use octavo_app::domain::orders::OrdersServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Your cart is empty"),
        OrdersServiceError::InvalidAddress => StatusError::bad_request().brief("Invalid address"),
        OrdersServiceError::InvalidPayment => {
            StatusError::bad_request().brief("Invalid payment method")
        }
        OrdersServiceError::Unavailable => {
            StatusError::conflict().brief("A copy in your cart is no longer available")
        }
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::Sql(source) => {
            error!("orders storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
