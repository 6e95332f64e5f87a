//! List Reservations Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    reservations::{errors::into_status_error, handlers::create::ReservationResponse},
    state::State,
};

/// List Reservations Handler
///
/// Active reservations by default; pass `active=false` for history.
#[endpoint(
    tags("reservations"),
    summary = "List Reservations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    active: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ReservationResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let reservations = state
        .app
        .reservations
        .list_reservations(customer.uuid, active.into_inner().unwrap_or(true))
        .await
        .map_err(into_status_error)?;

    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use octavo_app::domain::reservations::MockReservationsService;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, service_with_reservations};

    use super::*;

    fn make_service(reservations: MockReservationsService) -> Service {
        service_with_reservations(reservations, Router::with_path("reservations").get(handler))
    }

    #[tokio::test]
    async fn test_defaults_to_active_reservations() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations
            .expect_list_reservations()
            .once()
            .withf(|customer, active| *customer == TEST_CUSTOMER_UUID && *active)
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/reservations")
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_forwards_inactive_filter() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations
            .expect_list_reservations()
            .once()
            .withf(|customer, active| *customer == TEST_CUSTOMER_UUID && !*active)
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/reservations?active=false")
            .send(&make_service(reservations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
