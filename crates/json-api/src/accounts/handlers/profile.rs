//! Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::accounts::models::CustomerAccount;

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Customer Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub uuid: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub document_id: String,
    pub birth_date: String,
    pub receive_news: bool,
}

impl From<CustomerAccount> for ProfileResponse {
    fn from(account: CustomerAccount) -> Self {
        Self {
            uuid: account.user.uuid.into_uuid(),
            email: account.user.email,
            first_name: account.user.first_name,
            last_name: account.user.last_name,
            document_id: account.profile.document_id,
            birth_date: account.profile.birth_date.to_string(),
            receive_news: account.profile.receive_news,
        }
    }
}

/// Get Profile Handler
///
/// Returns the authenticated customer's profile.
#[endpoint(
    tags("accounts"),
    summary = "Get Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let account = state
        .app
        .accounts
        .get_customer_account(customer.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(account.into()))
}
