//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, domain::accounts::models::UserUuid};

/// Explicit role carried on every authenticated identity.
///
/// Derived once, at authentication time, from the account flags; request
/// handlers dispatch on this enum rather than probing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Root,
    Administrator,
    Customer,
}

impl Role {
    /// Superuser wins over staff; everyone else is a customer.
    #[must_use]
    pub const fn from_flags(is_superuser: bool, is_staff: bool) -> Self {
        if is_superuser {
            Self::Root
        } else if is_staff {
            Self::Administrator
        } else {
            Self::Customer
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Administrator => "administrator",
            Self::Customer => "customer",
        }
    }
}

/// Identity resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub email: String,
    pub role: Role,
}

/// Successful login payload: the raw token plus who it belongs to.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: Option<Timestamp>,
    pub user: AuthenticatedUser,
    pub first_name: String,
    pub last_name: String,
}

/// API token row joined with its owning account, as read during bearer
/// authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_digest: String,
    pub expires_at: Option<Timestamp>,
    pub email: String,
    pub account_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Account fields needed to resolve an identity and verify a password.
#[derive(Debug, Clone)]
pub(crate) struct CredentialRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_salt: String,
    pub password_digest: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_digest: String,
    pub expires_at: Option<Timestamp>,
}
