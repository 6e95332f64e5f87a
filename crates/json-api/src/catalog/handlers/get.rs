//! Get Book Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    catalog::{errors::into_status_error, models::BookWithCopiesResponse},
    extensions::*,
    state::State,
};

/// Get Book Handler
///
/// Public detail view of one active book with its copies.
#[endpoint(tags("catalog"), summary = "Get Book")]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookWithCopiesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let entry = state
        .app
        .catalog
        .get_book(book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(entry.into()))
}
