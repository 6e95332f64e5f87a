//! List Messages Handler

use std::sync::Arc;

use octavo_app::auth::Role;
use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    support::{errors::into_status_error, handlers::create::SupportMessageResponse},
};

/// List Messages Handler
///
/// Administrators see every message; customers see their own.
#[endpoint(
    tags("support"),
    summary = "List Messages",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<SupportMessageResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    let messages = match user.role {
        Role::Administrator => state.app.support.list_messages().await,
        Role::Customer => state.app.support.list_messages_for_customer(user.uuid).await,
        Role::Root => return Err(StatusError::forbidden().brief("No message board for root")),
    }
    .map_err(into_status_error)?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use octavo_app::domain::support::MockSupportService;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_CUSTOMER_UUID, authed_service, service_with_support, state_with_support,
        test_administrator,
    };

    use super::*;

    #[tokio::test]
    async fn test_customer_sees_own_messages_only() -> TestResult {
        let mut support = MockSupportService::new();

        support
            .expect_list_messages_for_customer()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(|_| Ok(Vec::new()));

        let service = service_with_support(support, Router::with_path("support/messages").get(handler));

        let res = TestClient::get("http://example.com/support/messages")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_administrator_sees_all_messages() -> TestResult {
        let mut support = MockSupportService::new();

        support
            .expect_list_messages()
            .once()
            .return_once(|| Ok(Vec::new()));

        let service = authed_service(
            state_with_support(support),
            test_administrator(),
            Router::with_path("support/messages").get(handler),
        );

        let res = TestClient::get("http://example.com/support/messages")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
