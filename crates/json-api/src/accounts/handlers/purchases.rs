//! Purchase History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::accounts::models::PurchaseRecord;

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Purchase Record Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseRecordResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,

    /// Total in cents.
    pub total: u64,
    pub purchased_at: String,
    pub address_uuid: Uuid,
    pub payment_method_uuid: Uuid,
    pub copy_codes: Vec<Uuid>,
}

impl From<PurchaseRecord> for PurchaseRecordResponse {
    fn from(record: PurchaseRecord) -> Self {
        Self {
            uuid: record.uuid.into_uuid(),
            order_uuid: record.order_uuid.into_uuid(),
            total: record.total,
            purchased_at: record.purchased_at.to_string(),
            address_uuid: record.address_uuid.into_uuid(),
            payment_method_uuid: record.payment_method_uuid.into_uuid(),
            copy_codes: record.copy_codes,
        }
    }
}

/// Purchase History Handler
///
/// Returns the customer's append-only purchase log, newest first.
#[endpoint(
    tags("accounts"),
    summary = "Purchase History",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<PurchaseRecordResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let purchases = state
        .app
        .accounts
        .list_purchases(customer.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(purchases.into_iter().map(Into::into).collect()))
}
