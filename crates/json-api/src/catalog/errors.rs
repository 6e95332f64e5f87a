//! Errors

use octavo_app::domain::catalog::CatalogServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => StatusError::conflict().brief("Book already exists"),
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid catalog payload")
        }
        CatalogServiceError::NotFound => StatusError::not_found(),
        CatalogServiceError::Sql(source) => {
            error!("catalog storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
