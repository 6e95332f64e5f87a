//! Errors

use octavo_app::domain::reservations::ReservationsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: ReservationsServiceError) -> StatusError {
    match error {
        ReservationsServiceError::Unavailable => {
            StatusError::bad_request().brief("This copy is not available")
        }
        ReservationsServiceError::QuotaExceeded => {
            StatusError::bad_request().brief("Reservation limit reached")
        }
        ReservationsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid reservation payload")
        }
        ReservationsServiceError::NotFound => StatusError::not_found(),
        ReservationsServiceError::Sql(source) => {
            error!("reservations storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
