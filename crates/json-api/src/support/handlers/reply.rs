//! Reply To Message Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::support::models::{NewMessageReply, ReplyUuid};

use crate::{
    extensions::*,
    state::State,
    support::{errors::into_status_error, handlers::create::MessageReplyResponse},
};

/// Reply Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReplyRequest {
    pub body: String,
}

/// Reply To Message Handler
#[endpoint(
    tags("support"),
    summary = "Reply To Message",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    message: PathParam<Uuid>,
    json: JsonBody<ReplyRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageReplyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let administrator = depot.administrator_or_403()?;

    let created = state
        .app
        .support
        .reply_to_message(
            administrator.uuid,
            message.into_inner().into(),
            NewMessageReply {
                uuid: ReplyUuid::new(),
                body: json.into_inner().body,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::domain::support::{
        MockSupportService, SupportServiceError, models::MessageReply,
    };
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        authed_service, service_with_support, state_with_support, test_administrator,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("support/messages/{message}/replies").post(handler)
    }

    #[tokio::test]
    async fn test_customer_cannot_reply() -> TestResult {
        let service = service_with_support(MockSupportService::new(), route());

        let res = TestClient::post(format!(
            "http://example.com/support/messages/{}/replies",
            Uuid::now_v7()
        ))
        .json(&json!({ "body": "We shipped it" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_administrator_replies() -> TestResult {
        let mut support = MockSupportService::new();

        support
            .expect_reply_to_message()
            .once()
            .return_once(|administrator, message, reply| {
                Ok(MessageReply {
                    uuid: reply.uuid,
                    message_uuid: message,
                    administrator_uuid: administrator,
                    body: reply.body,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let service = authed_service(state_with_support(support), test_administrator(), route());

        let res = TestClient::post(format!(
            "http://example.com/support/messages/{}/replies",
            Uuid::now_v7()
        ))
        .json(&json!({ "body": "We shipped it" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_reply_to_unknown_message_returns_404() -> TestResult {
        let mut support = MockSupportService::new();

        support
            .expect_reply_to_message()
            .once()
            .return_once(|_, _, _| Err(SupportServiceError::NotFound));

        let service = authed_service(state_with_support(support), test_administrator(), route());

        let res = TestClient::post(format!(
            "http://example.com/support/messages/{}/replies",
            Uuid::now_v7()
        ))
        .json(&json!({ "body": "We shipped it" }))
        .send(&service)
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
