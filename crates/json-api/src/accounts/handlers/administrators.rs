//! Administrator Management Handlers (root only)

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::accounts::models::{NewAdministrator, User, UserUuid};

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Administrator Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdministratorResponse {
    pub uuid: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl From<User> for AdministratorResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Create Administrator Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAdministratorRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// List Administrators Handler
#[endpoint(
    tags("accounts"),
    summary = "List Administrators",
    security(("bearer_auth" = []))
)]
pub(crate) async fn index(
    depot: &mut Depot,
) -> Result<Json<Vec<AdministratorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.root_or_403()?;

    let administrators = state
        .app
        .accounts
        .list_administrators()
        .await
        .map_err(into_status_error)?;

    Ok(Json(administrators.into_iter().map(Into::into).collect()))
}

/// Create Administrator Handler
#[endpoint(
    tags("accounts"),
    summary = "Create Administrator",
    security(("bearer_auth" = []))
)]
pub(crate) async fn create(
    json: JsonBody<CreateAdministratorRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AdministratorResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.root_or_403()?;

    let request = json.into_inner();

    let created = state
        .app
        .accounts
        .create_administrator(NewAdministrator {
            uuid: UserUuid::new(),
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::domain::accounts::MockAccountsService;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{authed_service, state_with_accounts, test_customer, test_root};

    use super::*;

    fn admin_route() -> Router {
        Router::with_path("administrators").get(index).post(create)
    }

    #[tokio::test]
    async fn test_customer_cannot_list_administrators() -> TestResult {
        let service = authed_service(
            state_with_accounts(MockAccountsService::new()),
            test_customer(),
            admin_route(),
        );

        let res = TestClient::get("http://example.com/administrators")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_root_lists_administrators() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts.expect_list_administrators().once().return_once(|| {
            Ok(vec![User {
                uuid: UserUuid::new(),
                email: "staff@example.com".to_string(),
                first_name: "Sam".to_string(),
                last_name: "Staff".to_string(),
                is_active: true,
                is_staff: true,
                is_superuser: false,
                created_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let service = authed_service(state_with_accounts(accounts), test_root(), admin_route());

        let res = TestClient::get("http://example.com/administrators")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
