//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octavo_app::domain::orders::models::{Order, OrderItem};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub address_uuid: Uuid,
    pub payment_method_uuid: Uuid,
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Total in cents, fixed at checkout.
    pub total: u64,

    /// One of `PREPARING`, `SHIPPED`, `DELIVERED`.
    pub state: String,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub copy_uuid: Uuid,
    pub book_title: String,
    pub quantity: u32,

    /// Price captured at checkout, in cents.
    pub unit_price: u64,

    /// `quantity * unit_price`, in cents.
    pub subtotal: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            copy_uuid: item.copy_uuid.into_uuid(),
            subtotal: item.subtotal(),
            book_title: item.book_title,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            total: order.total,
            state: order.state.as_str().to_string(),
            created_at: order.created_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Checkout Handler
///
/// Converts the cart into an order as one unit.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid address/payment"),
        (status_code = StatusCode::CONFLICT, description = "A copy was taken concurrently"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();

    let order = state
        .app
        .orders
        .checkout(
            customer.uuid,
            request.address_uuid.into(),
            request.payment_method_uuid.into(),
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use octavo_app::domain::{
        catalog::models::CopyUuid,
        orders::{
            MockOrdersService, OrderState, OrdersServiceError,
            models::{OrderItemUuid, OrderUuid},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_CUSTOMER_UUID, service_with_orders};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service_with_orders(orders, Router::with_path("checkout").post(handler))
    }

    fn item(unit_price: u64, quantity: u32) -> OrderItem {
        OrderItem {
            uuid: OrderItemUuid::new(),
            copy_uuid: CopyUuid::new(),
            book_title: "María".to_string(),
            quantity,
            unit_price,
        }
    }

    #[tokio::test]
    async fn test_checkout_returns_created_order() -> TestResult {
        let address = Uuid::now_v7();
        let payment = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(move |customer, addr, pay| {
                *customer == TEST_CUSTOMER_UUID
                    && addr.into_uuid() == address
                    && pay.into_uuid() == payment
            })
            .return_once(|customer, addr, pay| {
                Ok(Order {
                    uuid: OrderUuid::new(),
                    customer_uuid: customer,
                    address_uuid: addr,
                    payment_method_uuid: pay,
                    total: 55_00,
                    state: OrderState::Preparing,
                    created_at: Timestamp::UNIX_EPOCH,
                    items: vec![item(20_00, 2), item(15_00, 1)],
                })
            });

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&json!({ "address_uuid": address, "payment_method_uuid": payment }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.total, 55_00);
        assert_eq!(body.state, "PREPARING");
        assert_eq!(body.items.len(), 2);

        let summed: u64 = body.items.iter().map(|i| i.subtotal).sum();
        assert_eq!(summed, body.total, "item subtotals must sum to the total");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/checkout")
            .json(&json!({
                "address_uuid": Uuid::now_v7(),
                "payment_method_uuid": Uuid::now_v7()
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_lost_copy_race_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Unavailable));

        let res = TestClient::post("http://example.com/checkout")
            .json(&json!({
                "address_uuid": Uuid::now_v7(),
                "payment_method_uuid": Uuid::now_v7()
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
