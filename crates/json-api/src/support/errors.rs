//! Errors

use octavo_app::domain::support::SupportServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: SupportServiceError) -> StatusError {
    match error {
        SupportServiceError::InvalidReference | SupportServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid message payload")
        }
        SupportServiceError::NotFound => StatusError::not_found(),
        SupportServiceError::Sql(source) => {
            error!("support storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
