//! Get Message Handler

use std::sync::Arc;

use octavo_app::auth::Role;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    support::{errors::into_status_error, handlers::create::SupportMessageResponse},
};

/// Get Message Handler
///
/// Customers may only read their own messages.
#[endpoint(
    tags("support"),
    summary = "Get Message",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    message: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SupportMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authenticated_user_or_401()?;

    let found = state
        .app
        .support
        .get_message(message.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if user.role == Role::Customer && found.customer_uuid != user.uuid {
        return Err(StatusError::forbidden().brief("You may only read your own messages"));
    }

    Ok(Json(found.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::domain::{
        accounts::models::UserUuid,
        support::{MockSupportService, models::MessageUuid, models::SupportMessage},
    };
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::service_with_support;

    use super::*;

    #[tokio::test]
    async fn test_customer_cannot_read_anothers_message() -> TestResult {
        let mut support = MockSupportService::new();

        support.expect_get_message().once().return_once(|message| {
            Ok(SupportMessage {
                uuid: message,
                customer_uuid: UserUuid::new(),
                customer_email: "someone@example.com".to_string(),
                body: "private".to_string(),
                created_at: Timestamp::UNIX_EPOCH,
                replies: Vec::new(),
            })
        });

        let service = service_with_support(
            support,
            Router::with_path("support/messages/{message}").get(handler),
        );

        let res = TestClient::get(format!(
            "http://example.com/support/messages/{}",
            MessageUuid::new()
        ))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
