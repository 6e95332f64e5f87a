//! Advance Orders Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::orders::models::OrderAdvance;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// One order transition applied by the sweep.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderAdvanceResponse {
    pub order_uuid: Uuid,
    pub state: String,
}

impl From<OrderAdvance> for OrderAdvanceResponse {
    fn from(advance: OrderAdvance) -> Self {
        Self {
            order_uuid: advance.order_uuid.into_uuid(),
            state: advance.state.as_str().to_string(),
        }
    }
}

/// Advance Orders Handler
///
/// Applies due delivery-state transitions, one step per order; invoked on
/// demand in place of a logistics signal.
#[endpoint(
    tags("orders"),
    summary = "Advance Order States",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<OrderAdvanceResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    let advanced = state
        .app
        .orders
        .advance_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(advanced.into_iter().map(Into::into).collect()))
}
