//! Customer Registration Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::accounts::models::{NewCustomer, UserUuid};

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Register Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterCustomerRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub document_id: String,

    /// ISO date, e.g. `1990-07-14`.
    pub birth_date: String,

    #[serde(default)]
    pub receive_news: bool,
}

/// Customer Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerRegisteredResponse {
    /// Created account UUID
    pub uuid: Uuid,
    pub message: String,
}

/// Register Customer Handler
#[endpoint(
    tags("auth"),
    summary = "Register Customer",
    responses(
        (status_code = StatusCode::CREATED, description = "Customer registered"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerRegisteredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let birth_date = request
        .birth_date
        .parse()
        .map_err(|_parse_error| StatusError::bad_request().brief("Invalid birth date"))?;

    let account = state
        .app
        .accounts
        .register_customer(NewCustomer {
            uuid: UserUuid::new(),
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            document_id: request.document_id,
            birth_date,
            receive_news: request.receive_news,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CustomerRegisteredResponse {
        uuid: account.user.uuid.into_uuid(),
        message: "Customer registered".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use octavo_app::domain::accounts::{
        AccountsServiceError, MockAccountsService,
        models::{CustomerAccount, CustomerProfile, User},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::service_with_accounts;

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        service_with_accounts(accounts, Router::with_path("auth/register").post(handler))
    }

    fn account(email: &str) -> CustomerAccount {
        let uuid = UserUuid::new();

        CustomerAccount {
            user: User {
                uuid,
                email: email.to_string(),
                first_name: "Jordan".to_string(),
                last_name: "Reader".to_string(),
                is_active: true,
                is_staff: false,
                is_superuser: false,
                created_at: jiff::Timestamp::UNIX_EPOCH,
            },
            profile: CustomerProfile {
                user_uuid: uuid,
                document_id: "CC-1".to_string(),
                birth_date: jiff::civil::date(1990, 7, 14),
                receive_news: false,
            },
        }
    }

    #[tokio::test]
    async fn test_register_returns_201() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register_customer()
            .once()
            .withf(|new| new.email == "reader@example.com" && !new.receive_news)
            .return_once(|new| {
                let mut created = account(&new.email);
                created.user.uuid = new.uuid;
                Ok(created)
            });

        let mut res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "email": "reader@example.com",
                "password": "hunter2",
                "first_name": "Jordan",
                "last_name": "Reader",
                "document_id": "CC-1",
                "birth_date": "1990-07-14"
            }))
            .send(&make_service(accounts))
            .await;

        let body: CustomerRegisteredResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.message, "Customer registered");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_409() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register_customer()
            .once()
            .return_once(|_| Err(AccountsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "email": "reader@example.com",
                "password": "hunter2",
                "first_name": "Jordan",
                "last_name": "Reader",
                "document_id": "CC-1",
                "birth_date": "1990-07-14"
            }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_invalid_birth_date_returns_400() -> TestResult {
        let accounts = MockAccountsService::new();

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "email": "reader@example.com",
                "password": "hunter2",
                "first_name": "Jordan",
                "last_name": "Reader",
                "document_id": "CC-1",
                "birth_date": "not a date"
            }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
