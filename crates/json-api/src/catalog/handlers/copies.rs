//! Add Copies Handler

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

use octavo_app::domain::catalog::models::{CopyCondition, NewCopies};

use crate::{
    catalog::{errors::into_status_error, models::CopyResponse},
    extensions::*,
    state::State,
};

/// Add Copies Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCopiesRequest {
    /// Number of identical copies to add.
    pub count: u32,

    /// Price of each copy, in cents.
    pub price: u64,

    /// `new` or `used`; defaults to `new`.
    #[serde(default)]
    pub condition: Option<String>,
}

/// Add Copies Handler
#[endpoint(
    tags("catalog"),
    summary = "Add Copies",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<AddCopiesRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Vec<CopyResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.administrator_or_403()?;

    let request = json.into_inner();

    if request.count == 0 {
        return Err(StatusError::bad_request().brief("Copy count must be positive"));
    }

    let condition = match request.condition.as_deref() {
        None => CopyCondition::New,
        Some(raw) => raw
            .parse()
            .map_err(|_parse_error| StatusError::bad_request().brief("Invalid copy condition"))?,
    };

    let created = state
        .app
        .catalog
        .add_copies(
            book.into_inner().into(),
            NewCopies {
                count: request.count,
                price: request.price,
                condition,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into_iter().map(Into::into).collect()))
}
