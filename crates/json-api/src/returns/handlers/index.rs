//! List Returns Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    returns::{errors::into_status_error, handlers::create::ReturnResponse},
    state::State,
};

/// List Returns Handler
///
/// The customer's returns, newest first, receipts included.
#[endpoint(
    tags("returns"),
    summary = "List Returns",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ReturnResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let returns = state
        .app
        .returns
        .list_returns(customer.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(returns.into_iter().map(Into::into).collect()))
}
