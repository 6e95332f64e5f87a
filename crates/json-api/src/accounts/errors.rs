//! Errors

use octavo_app::domain::accounts::AccountsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Account already exists")
        }
        AccountsServiceError::InvalidReference
        | AccountsServiceError::MissingRequiredData
        | AccountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account payload")
        }
        AccountsServiceError::NotFound => StatusError::not_found(),
        AccountsServiceError::Sql(source) => {
            error!("accounts storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
