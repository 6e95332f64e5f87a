//! Request Return Handler

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::returns::models::{NewReturn, Return, ReturnUuid};

use crate::{extensions::*, returns::errors::into_status_error, state::State};

/// Request Return Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RequestReturnRequest {
    pub copy_uuid: Uuid,

    /// One of `damaged`, `not_as_expected`, `arrived_late`.
    pub cause: String,

    #[serde(default)]
    pub reason: String,
}

/// Return Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnResponse {
    pub uuid: Uuid,
    pub copy_uuid: Uuid,
    pub cause: String,
    pub reason: String,
    pub requested_at: String,

    /// Base64-encoded PNG QR receipt; absent when rendering failed.
    pub receipt_png: Option<String>,
}

impl From<Return> for ReturnResponse {
    fn from(ret: Return) -> Self {
        Self {
            uuid: ret.uuid.into_uuid(),
            copy_uuid: ret.copy_uuid.into_uuid(),
            cause: ret.cause.as_str().to_string(),
            reason: ret.reason,
            requested_at: ret.requested_at.to_string(),
            receipt_png: ret.receipt_png.as_deref().map(|png| STANDARD.encode(png)),
        }
    }
}

/// Request Return Handler
#[endpoint(
    tags("returns"),
    summary = "Request Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Return registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Return window closed or bad payload"),
        (status_code = StatusCode::NOT_FOUND, description = "Copy was never purchased by this customer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RequestReturnRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReturnResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();

    let cause = request
        .cause
        .parse()
        .map_err(|_parse_error| StatusError::bad_request().brief("Invalid return cause"))?;

    let created = state
        .app
        .returns
        .request_return(
            customer.uuid,
            NewReturn {
                uuid: ReturnUuid::new(),
                copy_uuid: request.copy_uuid.into(),
                cause,
                reason: request.reason,
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
    use octavo_app::domain::returns::{
        MockReturnsService, ReturnsServiceError, models::ReturnCause,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, service_with_returns};

    use super::*;

    fn make_service(returns: MockReturnsService) -> Service {
        service_with_returns(returns, Router::with_path("returns").post(handler))
    }

    #[tokio::test]
    async fn test_create_encodes_receipt_as_base64() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_request_return()
            .once()
            .withf(|customer, request| {
                *customer == TEST_CUSTOMER_UUID && request.cause == ReturnCause::Damaged
            })
            .return_once(|customer, request| {
                Ok(Return {
                    uuid: request.uuid,
                    customer_uuid: customer,
                    copy_uuid: request.copy_uuid,
                    cause: request.cause,
                    reason: request.reason,
                    requested_at: Timestamp::UNIX_EPOCH,
                    receipt_png: Some(vec![0x89, b'P', b'N', b'G']),
                })
            });

        let mut res = TestClient::post("http://example.com/returns")
            .json(&json!({
                "copy_uuid": Uuid::now_v7(),
                "cause": "damaged",
                "reason": "Pages missing"
            }))
            .send(&make_service(returns))
            .await;

        let body: ReturnResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.receipt_png.as_deref(), Some("iVBORw=="));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_purchase_returns_400() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_request_return()
            .once()
            .return_once(|_, _| Err(ReturnsServiceError::Expired));

        let res = TestClient::post("http://example.com/returns")
            .json(&json!({ "copy_uuid": Uuid::now_v7(), "cause": "arrived_late" }))
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_never_purchased_copy_returns_404() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_request_return()
            .once()
            .return_once(|_, _| Err(ReturnsServiceError::NotFound));

        let res = TestClient::post("http://example.com/returns")
            .json(&json!({ "copy_uuid": Uuid::now_v7(), "cause": "damaged" }))
            .send(&make_service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_cause_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/returns")
            .json(&json!({ "copy_uuid": Uuid::now_v7(), "cause": "changed_my_mind" }))
            .send(&make_service(MockReturnsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
