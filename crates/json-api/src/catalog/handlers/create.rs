//! Create Book Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use octavo_app::domain::catalog::models::{BookUuid, CopyCondition, NewBook, NewCopies};

use crate::{
    catalog::{errors::into_status_error, models::BookWithCopiesResponse},
    extensions::*,
    state::State,
};

/// Create Book Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub publication_year: i32,

    /// ISO date, e.g. `1967-05-30`.
    pub publication_date: String,
    pub genre: String,
    pub page_count: i32,
    pub publisher: String,
    pub issn: String,
    pub language: String,
    pub category: String,
    pub cover_image: Option<String>,

    #[serde(default)]
    pub synopsis: String,

    #[serde(default)]
    pub featured: bool,

    /// Number of identical copies created with the book.
    #[serde(default = "default_copy_count")]
    pub copy_count: u32,

    /// Price of every initial copy, in cents.
    pub price: u64,

    /// `new` or `used`; defaults to `new`.
    #[serde(default)]
    pub condition: Option<String>,
}

fn default_copy_count() -> u32 {
    1
}

/// Create Book Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book created"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookWithCopiesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    let request = json.into_inner();

    let publication_date = request
        .publication_date
        .parse()
        .map_err(|_parse_error| StatusError::bad_request().brief("Invalid publication date"))?;

    let condition = match request.condition.as_deref() {
        None => CopyCondition::New,
        Some(raw) => raw
            .parse()
            .map_err(|_parse_error| StatusError::bad_request().brief("Invalid copy condition"))?,
    };

    let created = state
        .app
        .catalog
        .create_book(
            NewBook {
                uuid: BookUuid::new(),
                title: request.title,
                author: request.author,
                publication_year: request.publication_year,
                publication_date,
                genre: request.genre,
                page_count: request.page_count,
                publisher: request.publisher,
                issn: request.issn,
                language: request.language,
                category: request.category,
                cover_image: request.cover_image,
                synopsis: request.synopsis,
                featured: request.featured,
            },
            NewCopies {
                count: request.copy_count,
                price: request.price,
                condition,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
