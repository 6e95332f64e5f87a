//! Address Handlers

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

use octavo_app::domain::accounts::models::{Address, AddressUpdate, AddressUuid, NewAddress};

use crate::{accounts::errors::into_status_error, extensions::*, state::State};

/// Address Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub uuid: Uuid,
    pub detail: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub postal_code: String,
    pub created_at: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            uuid: address.uuid.into_uuid(),
            detail: address.detail,
            country: address.country,
            region: address.region,
            city: address.city,
            postal_code: address.postal_code,
            created_at: address.created_at.to_string(),
        }
    }
}

/// Create Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAddressRequest {
    pub detail: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub postal_code: String,
}

/// Update Address Request; absent fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateAddressRequest {
    pub detail: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

/// List Addresses Handler
#[endpoint(
    tags("accounts"),
    summary = "List Addresses",
    security(("bearer_auth" = []))
)]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<Vec<AddressResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let addresses = state
        .app
        .accounts
        .list_addresses(customer.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(addresses.into_iter().map(Into::into).collect()))
}

/// Create Address Handler
#[endpoint(
    tags("accounts"),
    summary = "Add Address",
    security(("bearer_auth" = []))
)]
pub(crate) async fn create(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();

    let created = state
        .app
        .accounts
        .create_address(
            customer.uuid,
            NewAddress {
                uuid: AddressUuid::new(),
                detail: request.detail,
                country: request.country,
                region: request.region,
                city: request.city,
                postal_code: request.postal_code,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

/// Update Address Handler
#[endpoint(
    tags("accounts"),
    summary = "Edit Address",
    security(("bearer_auth" = []))
)]
pub(crate) async fn update(
    address: PathParam<Uuid>,
    json: JsonBody<UpdateAddressRequest>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();

    let updated = state
        .app
        .accounts
        .update_address(
            customer.uuid,
            address.into_inner().into(),
            AddressUpdate {
                detail: request.detail,
                country: request.country,
                region: request.region,
                city: request.city,
                postal_code: request.postal_code,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

/// Delete Address Handler (soft delete)
#[endpoint(
    tags("accounts"),
    summary = "Remove Address",
    security(("bearer_auth" = []))
)]
pub(crate) async fn delete(
    address: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    state
        .app
        .accounts
        .deactivate_address(customer.uuid, address.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
