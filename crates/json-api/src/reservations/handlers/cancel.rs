//! Cancel Reservation Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, reservations::errors::into_status_error, state::State};

/// Reservation Cancelled Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReservationCancelledResponse {
    pub message: String,
}

/// Cancel Reservation Handler
///
/// Releases the held copy; repeating the call is a no-op.
#[endpoint(
    tags("reservations"),
    summary = "Cancel Reservation",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    reservation: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReservationCancelledResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    state
        .app
        .reservations
        .cancel_reservation(customer.uuid, reservation.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReservationCancelledResponse {
        message: "Reservation cancelled".to_string(),
    }))
}
