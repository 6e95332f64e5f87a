//! Reservation Sweep Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, reservations::errors::into_status_error, state::State};

/// Sweep Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SweepResponse {
    /// Number of expired reservations released.
    pub released: u64,
}

/// Reservation Sweep Handler
///
/// On-demand expiry pass; there is no background scheduler.
#[endpoint(
    tags("reservations"),
    summary = "Sweep Expired Reservations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SweepResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    let released = state
        .app
        .reservations
        .sweep_expired()
        .await
        .map_err(into_status_error)?;

    Ok(Json(SweepResponse { released }))
}

#[cfg(test)]
mod tests {
    use octavo_app::domain::reservations::MockReservationsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{
        authed_service, service_with_reservations, state_with_reservations, test_administrator,
    };

    use super::*;

    #[tokio::test]
    async fn test_customer_cannot_sweep() -> TestResult {
        let service = service_with_reservations(
            MockReservationsService::new(),
            Router::with_path("reservations/sweep").post(handler),
        );

        let res = TestClient::post("http://example.com/reservations/sweep")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_sweep_reports_released_count() -> TestResult {
        let mut reservations = MockReservationsService::new();

        reservations.expect_sweep_expired().once().return_once(|| Ok(3));

        let service = authed_service(
            state_with_reservations(reservations),
            test_administrator(),
            Router::with_path("reservations/sweep").post(handler),
        );

        let mut res = TestClient::post("http://example.com/reservations/sweep")
            .send(&service)
            .await;

        let body: SweepResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.released, 3);

        Ok(())
    }
}
