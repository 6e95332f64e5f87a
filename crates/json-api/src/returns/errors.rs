//! Errors

use octavo_app::domain::returns::ReturnsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: ReturnsServiceError) -> StatusError {
    match error {
        ReturnsServiceError::Expired => {
            StatusError::bad_request().brief("The return window for this purchase has closed")
        }
        ReturnsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid return payload")
        }
        ReturnsServiceError::NotFound => StatusError::not_found(),
        ReturnsServiceError::Sql(source) => {
            error!("returns storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
