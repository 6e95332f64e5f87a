//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::carts::models::{CartItemUuid, NewCartItem};

use crate::{
    carts::{errors::into_status_error, handlers::get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub copy_uuid: Uuid,

    /// Defaults to one.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Add Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Copy unavailable or already in the cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Copy not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();

    let item = state
        .app
        .carts
        .add_item(
            customer.uuid,
            NewCartItem {
                uuid: CartItemUuid::new(),
                copy_uuid: request.copy_uuid.into(),
                quantity: request.quantity,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::domain::carts::{CartsServiceError, MockCartsService, models::CartItem};
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, service_with_carts};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service_with_carts(carts, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_returns_201() -> TestResult {
        let copy_uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |customer, item| {
                *customer == TEST_CUSTOMER_UUID
                    && item.copy_uuid.into_uuid() == copy_uuid
                    && item.quantity == 1
            })
            .return_once(|_, item| {
                Ok(CartItem {
                    uuid: item.uuid,
                    copy_uuid: item.copy_uuid,
                    book_title: "Delirio".to_string(),
                    unit_price: 20_00,
                    quantity: item.quantity,
                    added_at: Timestamp::UNIX_EPOCH,
                })
            });

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "copy_uuid": copy_uuid }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_copy_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Duplicate));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "copy_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_copy_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Unavailable));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "copy_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
