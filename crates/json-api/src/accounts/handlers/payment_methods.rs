//! Payment Method Handlers

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

use octavo_app::domain::accounts::models::{NewPaymentMethod, PaymentMethod, PaymentMethodUuid};

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Payment Method Response. Only the masked card number leaves the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentMethodResponse {
    pub uuid: Uuid,
    pub card_number: String,
    pub holder_name: String,
    pub expires: String,
    pub created_at: String,
}

impl From<PaymentMethod> for PaymentMethodResponse {
    fn from(method: PaymentMethod) -> Self {
        Self {
            uuid: method.uuid.into_uuid(),
            card_number: method.masked_number(),
            holder_name: method.holder_name.clone(),
            expires: method.expires.to_string(),
            created_at: method.created_at.to_string(),
        }
    }
}

/// Create Payment Method Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentMethodRequest {
    pub card_number: String,
    pub holder_name: String,

    /// ISO date, e.g. `2030-01-01`.
    pub expires: String,
}

/// List Payment Methods Handler
#[endpoint(
    tags("accounts"),
    summary = "List Payment Methods",
    security(("bearer_auth" = []))
)]
pub(crate) async fn index(
    depot: &mut Depot,
) -> Result<Json<Vec<PaymentMethodResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let methods = state
        .app
        .accounts
        .list_payment_methods(customer.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(methods.into_iter().map(Into::into).collect()))
}

/// Create Payment Method Handler
#[endpoint(
    tags("accounts"),
    summary = "Add Payment Method",
    security(("bearer_auth" = []))
)]
pub(crate) async fn create(
    json: JsonBody<CreatePaymentMethodRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentMethodResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();

    if request.card_number.len() < 12 || !request.card_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(StatusError::bad_request().brief("Invalid card number"));
    }

    let expires = request
        .expires
        .parse()
        .map_err(|_parse_error| StatusError::bad_request().brief("Invalid expiry date"))?;

    let created = state
        .app
        .accounts
        .create_payment_method(
            customer.uuid,
            NewPaymentMethod {
                uuid: PaymentMethodUuid::new(),
                card_number: request.card_number,
                holder_name: request.holder_name,
                expires,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

/// Delete Payment Method Handler (soft delete)
#[endpoint(
    tags("accounts"),
    summary = "Remove Payment Method",
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete(
    method: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    state
        .app
        .accounts
        .deactivate_payment_method(customer.uuid, method.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::domain::accounts::MockAccountsService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, service_with_accounts};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        service_with_accounts(
            accounts,
            Router::with_path("payment-methods")
                .get(index)
                .post(create)
                .push(Router::with_path("{method}").delete(delete)),
        )
    }

    #[tokio::test]
    async fn test_create_masks_card_number() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_create_payment_method()
            .once()
            .withf(|customer, method| {
                *customer == TEST_CUSTOMER_UUID && method.card_number == "4111111111111234"
            })
            .return_once(|customer, method| {
                Ok(PaymentMethod {
                    uuid: method.uuid,
                    customer_uuid: customer,
                    card_number: method.card_number,
                    holder_name: method.holder_name,
                    expires: method.expires,
                    active: true,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/payment-methods")
            .json(&json!({
                "card_number": "4111111111111234",
                "holder_name": "Jordan Reader",
                "expires": "2030-01-01"
            }))
            .send(&make_service(accounts))
            .await;

        let body: PaymentMethodResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.card_number, "**** **** **** 1234");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_rejects_non_numeric_card() -> TestResult {
        let accounts = MockAccountsService::new();

        let res = TestClient::post("http://example.com/payment-methods")
            .json(&json!({
                "card_number": "not-a-card",
                "holder_name": "Jordan Reader",
                "expires": "2030-01-01"
            }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
