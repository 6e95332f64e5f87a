//! Authenticated-identity depot helpers.
//!
//! The auth middleware resolves the bearer token to an
//! [`AuthenticatedUser`] and parks it in the depot; handlers read it back
//! through these helpers and gate on the explicit role enum.

use salvo::prelude::{Depot, StatusError};

use octavo_app::auth::{AuthenticatedUser, Role};

const AUTHENTICATED_USER_KEY: &str = "octavo.authenticated_user";

pub(crate) trait IdentityExt {
    fn insert_authenticated_user(&mut self, user: AuthenticatedUser);

    fn authenticated_user_or_401(&self) -> Result<&AuthenticatedUser, StatusError>;

    /// The identity, provided it carries the customer role.
    fn customer_or_403(&self) -> Result<&AuthenticatedUser, StatusError>;

    /// The identity, provided it carries the administrator role.
    fn administrator_or_403(&self) -> Result<&AuthenticatedUser, StatusError>;

    /// The identity, provided it carries the root role.
    fn root_or_403(&self) -> Result<&AuthenticatedUser, StatusError>;
}

impl IdentityExt for Depot {
    fn insert_authenticated_user(&mut self, user: AuthenticatedUser) {
        self.insert(AUTHENTICATED_USER_KEY, user);
    }

    fn authenticated_user_or_401(&self) -> Result<&AuthenticatedUser, StatusError> {
        self.get::<AuthenticatedUser>(AUTHENTICATED_USER_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn customer_or_403(&self) -> Result<&AuthenticatedUser, StatusError> {
        require_role(self, Role::Customer, "Only customers may perform this action")
    }

    fn administrator_or_403(&self) -> Result<&AuthenticatedUser, StatusError> {
        require_role(
            self,
            Role::Administrator,
            "Only administrators may perform this action",
        )
    }

    fn root_or_403(&self) -> Result<&AuthenticatedUser, StatusError> {
        require_role(self, Role::Root, "Only root may perform this action")
    }
}

fn require_role<'d>(
    depot: &'d Depot,
    role: Role,
    brief: &str,
) -> Result<&'d AuthenticatedUser, StatusError> {
    let user = depot.authenticated_user_or_401()?;

    if user.role != role {
        return Err(StatusError::forbidden().brief(brief.to_string()));
    }

    Ok(user)
}
