//! Restore Book Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Book Restored Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookRestoredResponse {
    pub message: String,
}

/// Restore Book Handler
///
/// Undoes a soft delete.
#[endpoint(
    tags("catalog"),
    summary = "Restore Book",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookRestoredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    state
        .app
        .catalog
        .restore_book(book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(BookRestoredResponse {
        message: "Book restored".to_string(),
    }))
}
