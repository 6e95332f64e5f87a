//! Exhausted Copies Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    catalog::{errors::into_status_error, models::CopyResponse},
    extensions::*,
    state::State,
};

/// Exhausted Copies Handler
///
/// Administrator listing of copies flagged exhausted.
#[endpoint(
    tags("catalog"),
    summary = "List Exhausted Copies",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CopyResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    let copies = state
        .app
        .catalog
        .list_exhausted_copies()
        .await
        .map_err(into_status_error)?;

    Ok(Json(copies.into_iter().map(Into::into).collect()))
}
