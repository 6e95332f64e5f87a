//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::carts::models::{Cart, CartItem};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The items in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of item subtotals, in cents; computed on read
    pub total: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            total: cart.total(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The copy this item refers to
    pub copy_uuid: Uuid,

    /// Title of the copy's book
    pub book_title: String,

    /// Live copy price, in cents
    pub unit_price: u64,

    /// Requested quantity
    pub quantity: u32,

    /// `quantity * unit_price`, in cents
    pub subtotal: u64,

    /// The instant the item was added
    pub added_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            copy_uuid: item.copy_uuid.into_uuid(),
            subtotal: item.subtotal(),
            book_title: item.book_title,
            unit_price: item.unit_price,
            quantity: item.quantity,
            added_at: item.added_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the customer's cart, creating it lazily.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let cart = state
        .app
        .carts
        .get_cart(customer.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
