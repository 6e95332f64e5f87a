//! Post Message Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::support::models::{
    MessageReply, MessageUuid, NewSupportMessage, SupportMessage,
};

use crate::{extensions::*, state::State, support::errors::into_status_error};

/// Post Message Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PostMessageRequest {
    pub body: String,
}

/// Support Message Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SupportMessageResponse {
    pub uuid: Uuid,
    pub customer_email: String,
    pub body: String,
    pub created_at: String,
    pub replies: Vec<MessageReplyResponse>,
}

/// Message Reply Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageReplyResponse {
    pub uuid: Uuid,
    pub body: String,
    pub created_at: String,
}

impl From<MessageReply> for MessageReplyResponse {
    fn from(reply: MessageReply) -> Self {
        Self {
            uuid: reply.uuid.into_uuid(),
            body: reply.body,
            created_at: reply.created_at.to_string(),
        }
    }
}

impl From<SupportMessage> for SupportMessageResponse {
    fn from(message: SupportMessage) -> Self {
        Self {
            uuid: message.uuid.into_uuid(),
            customer_email: message.customer_email,
            body: message.body,
            created_at: message.created_at.to_string(),
            replies: message.replies.into_iter().map(Into::into).collect(),
        }
    }
}

/// Post Message Handler
#[endpoint(
    tags("support"),
    summary = "Post Message",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<PostMessageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SupportMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let created = state
        .app
        .support
        .post_message(
            customer.uuid,
            NewSupportMessage {
                uuid: MessageUuid::new(),
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
    use octavo_app::domain::support::{MockSupportService, SupportServiceError};
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, service_with_support};

    use super::*;

    fn make_service(support: MockSupportService) -> Service {
        service_with_support(support, Router::with_path("support/messages").post(handler))
    }

    #[tokio::test]
    async fn test_post_message_returns_201() -> TestResult {
        let mut support = MockSupportService::new();

        support
            .expect_post_message()
            .once()
            .withf(|customer, message| {
                *customer == TEST_CUSTOMER_UUID && message.body == "Where is my order?"
            })
            .return_once(|customer, message| {
                Ok(SupportMessage {
                    uuid: message.uuid,
                    customer_uuid: customer,
                    customer_email: "reader@example.com".to_string(),
                    body: message.body,
                    created_at: Timestamp::UNIX_EPOCH,
                    replies: Vec::new(),
                })
            });

        let res = TestClient::post("http://example.com/support/messages")
            .json(&json!({ "body": "Where is my order?" }))
            .send(&make_service(support))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_message_returns_400() -> TestResult {
        let mut support = MockSupportService::new();

        support
            .expect_post_message()
            .once()
            .return_once(|_, _| Err(SupportServiceError::InvalidData));

        let res = TestClient::post("http://example.com/support/messages")
            .json(&json!({ "body": "   " }))
            .send(&make_service(support))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
