//! Create Reservation Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::reservations::models::Reservation;

use crate::{extensions::*, reservations::errors::into_status_error, state::State};

/// Create Reservation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReservationRequest {
    pub copy_uuid: Uuid,
}

/// Reservation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReservationResponse {
    pub uuid: Uuid,
    pub copy_uuid: Uuid,
    pub created_at: String,

    /// 24 hours after creation.
    pub expires_at: String,
    pub active: bool,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            uuid: reservation.uuid.into_uuid(),
            copy_uuid: reservation.copy_uuid.into_uuid(),
            created_at: reservation.created_at.to_string(),
            expires_at: reservation.expires_at.to_string(),
            active: reservation.active,
        }
    }
}

/// Create Reservation Handler
#[endpoint(
    tags("reservations"),
    summary = "Reserve Copy",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Reservation created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Copy unavailable or quota exceeded"),
        (status_code = StatusCode::NOT_FOUND, description = "Copy not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReservationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReservationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let reservation = state
        .app
        .reservations
        .create_reservation(customer.uuid, json.into_inner().copy_uuid.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(reservation.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::domain::reservations::{
        MockReservationsService, ReservationsServiceError,
        models::{ReservationUuid, expiry_deadline},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, service_with_reservations};

    use super::*;

    fn make_service(reservations: MockReservationsService) -> Service {
        service_with_reservations(reservations, Router::with_path("reservations").post(handler))
    }

    #[tokio::test]
    async fn test_create_returns_201_with_deadline() -> TestResult {
        let copy_uuid = Uuid::now_v7();

        let mut reservations = MockReservationsService::new();

        reservations
            .expect_create_reservation()
            .once()
            .withf(move |customer, copy| {
                *customer == TEST_CUSTOMER_UUID && copy.into_uuid() == copy_uuid
            })
            .return_once(|customer, copy| {
                let created_at = Timestamp::UNIX_EPOCH;

                Ok(Reservation {
                    uuid: ReservationUuid::new(),
                    customer_uuid: customer,
                    copy_uuid: copy,
                    created_at,
                    expires_at: expiry_deadline(created_at),
                    active: true,
                })
            });

        let mut res = TestClient::post("http://example.com/reservations")
            .json(&json!({ "copy_uuid": copy_uuid }))
            .send(&make_service(reservations))
            .await;

        let body: ReservationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(body.active, "fresh reservation should be active");
        assert_eq!(body.expires_at, "1970-01-02T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_copy_returns_400() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations
            .expect_create_reservation()
            .once()
            .return_once(|_, _| Err(ReservationsServiceError::Unavailable));

        let res = TestClient::post("http://example.com/reservations")
            .json(&json!({ "copy_uuid": Uuid::now_v7() }))
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_quota_exceeded_returns_400() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations
            .expect_create_reservation()
            .once()
            .return_once(|_, _| Err(ReservationsServiceError::QuotaExceeded));

        let res = TestClient::post("http://example.com/reservations")
            .json(&json!({ "copy_uuid": Uuid::now_v7() }))
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
