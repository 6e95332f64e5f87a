//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::auth::LoginOutcome;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token; shown once, never stored raw.
    pub token: String,

    /// Token expiry instant, if any.
    pub expires_at: Option<String>,

    pub user: LoginUserResponse,
}

/// Authenticated user payload returned on login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginUserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    /// One of `root`, `administrator`, `customer`.
    pub role: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token,
            expires_at: outcome.expires_at.as_ref().map(ToString::to_string),
            user: LoginUserResponse {
                uuid: outcome.user.uuid.into_uuid(),
                email: outcome.user.email,
                first_name: outcome.first_name,
                last_name: outcome.last_name,
                role: outcome.user.role.as_str().to_string(),
            },
        }
    }
}

/// Login Handler
///
/// Verifies credentials and issues a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let outcome = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::auth::{AuthServiceError, AuthenticatedUser, MockAuthService, Role};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::service_with_auth;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        service_with_auth(auth, Router::with_path("auth/login").post(handler))
    }

    fn outcome() -> LoginOutcome {
        LoginOutcome {
            token: "ov_v1_test.aa".to_string(),
            expires_at: Some(Timestamp::UNIX_EPOCH),
            user: AuthenticatedUser {
                uuid: Uuid::nil().into(),
                email: "reader@example.com".to_string(),
                role: Role::Customer,
            },
            first_name: "Jordan".to_string(),
            last_name: "Reader".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_returns_token_and_role() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|email, password| email == "reader@example.com" && password == "hunter2")
            .return_once(|_, _| Ok(outcome()));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "reader@example.com", "password": "hunter2" }))
            .send(&make_service(auth))
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "ov_v1_test.aa");
        assert_eq!(body.user.role, "customer");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_bad_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "reader@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
