//! Catalog Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    catalog::{errors::into_status_error, models::BookWithCopiesResponse},
    extensions::*,
    state::State,
};

/// Catalog Index Handler
///
/// Public listing of active books that have at least one sellable copy.
#[endpoint(tags("catalog"), summary = "Browse Catalog")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<BookWithCopiesResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let catalog = state
        .app
        .catalog
        .list_catalog()
        .await
        .map_err(into_status_error)?;

    Ok(Json(catalog.into_iter().map(Into::into).collect()))
}
