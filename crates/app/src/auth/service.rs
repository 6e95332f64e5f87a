//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, AuthenticatedUser, LoginOutcome, NewApiToken, Role,
        format_api_token, generate_api_token_secret, parse_api_token, repository::PgAuthRepository,
        token_digest, verify_password,
    },
    clock::Clock,
};

/// Issued bearer tokens lapse after thirty days.
const API_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(30 * 24);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    clock: Arc<dyn Clock>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            clock,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthServiceError> {
        let account = self
            .repository
            .find_credentials_by_email(email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !account.is_active
            || !verify_password(&account.password_salt, &account.password_digest, password)
        {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);
        let expires_at = self.clock.now().saturating_add(API_TOKEN_TTL).unwrap();

        self.repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid: account.uuid,
                version,
                token_digest: token_digest(&token_uuid, version, &account.uuid, &secret),
                expires_at: Some(expires_at),
            })
            .await?;

        Ok(LoginOutcome {
            token,
            expires_at: Some(expires_at),
            user: AuthenticatedUser {
                uuid: account.uuid,
                email: account.email,
                role: Role::from_flags(account.is_superuser, account.is_staff),
            },
            first_name: account.first_name,
            last_name: account.last_name,
        })
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed.version || !token.account_active {
            return Err(AuthServiceError::NotFound);
        }

        if token_lapsed(token.expires_at, self.clock.now()) {
            return Err(AuthServiceError::NotFound);
        }

        let expected = token_digest(
            &parsed.token_uuid,
            parsed.version,
            &token.user_uuid,
            &parsed.secret,
        );

        if expected != token.token_digest {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed.token_uuid)
            .await;

        Ok(AuthenticatedUser {
            uuid: token.user_uuid,
            email: token.email,
            role: Role::from_flags(token.is_superuser, token.is_staff),
        })
    }

    async fn revoke_bearer(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let revoked = self.repository.revoke_api_token(parsed.token_uuid).await?;

        if !revoked {
            return Err(AuthServiceError::NotFound);
        }

        Ok(())
    }
}

fn token_lapsed(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    expires_at.is_some_and(|deadline| now >= deadline)
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and issue a fresh bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthServiceError>;

    /// Resolve a bearer token to an identity with its role.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Revoke the presented bearer token (logout).
    async fn revoke_bearer(&self, bearer_token: &str) -> Result<(), AuthServiceError>;
}
