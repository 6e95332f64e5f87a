//! Update Book Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::catalog::models::BookUpdate;

use crate::{
    catalog::{errors::into_status_error, models::BookResponse},
    extensions::*,
    state::State,
};

/// Update Book Request; absent fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub synopsis: Option<String>,
    pub featured: Option<bool>,
}

impl From<UpdateBookRequest> for BookUpdate {
    fn from(request: UpdateBookRequest) -> Self {
        Self {
            title: request.title,
            author: request.author,
            genre: request.genre,
            publisher: request.publisher,
            language: request.language,
            category: request.category,
            cover_image: request.cover_image,
            synopsis: request.synopsis,
            featured: request.featured,
        }
    }
}

/// Update Book Handler
#[endpoint(
    tags("catalog"),
    summary = "Edit Book",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<UpdateBookRequest>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    let updated = state
        .app
        .catalog
        .update_book(book.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
