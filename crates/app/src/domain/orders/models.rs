//! Order Models

use jiff::Timestamp;

use crate::{
    domain::{
        accounts::models::{AddressUuid, PaymentMethodUuid, UserUuid},
        carts::models::CartItem,
        catalog::models::CopyUuid,
        orders::state::OrderState,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Order Model. Immutable once created, except for delivery-state
/// transitions.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub customer_uuid: UserUuid,
    pub address_uuid: AddressUuid,
    pub payment_method_uuid: PaymentMethodUuid,
    pub total: u64,
    pub state: OrderState,
    pub created_at: Timestamp,
    pub items: Vec<OrderItem>,
}

/// Order line item. The unit price is captured at checkout, never recomputed
/// from the live copy.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub copy_uuid: CopyUuid,
    pub book_title: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl OrderItem {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// One transition applied by an advancement sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAdvance {
    pub order_uuid: OrderUuid,
    pub state: OrderState,
}

/// Order total: the sum of cart-item subtotals at checkout time.
#[must_use]
pub fn order_total(items: &[CartItem]) -> u64 {
    items.iter().map(CartItem::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::carts::models::CartItemUuid;

    use super::*;

    fn cart_item(unit_price: u64, quantity: u32) -> CartItem {
        CartItem {
            uuid: CartItemUuid::new(),
            copy_uuid: CopyUuid::new(),
            book_title: "Pedro Páramo".to_string(),
            unit_price,
            quantity,
            added_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn total_sums_quantity_times_price() {
        // Two copies at 20.00 plus one at 15.00 comes to 55.00.
        let items = vec![cart_item(20_00, 2), cart_item(15_00, 1)];

        assert_eq!(order_total(&items), 55_00);
    }

    #[test]
    fn total_of_empty_cart_is_zero() {
        assert_eq!(order_total(&[]), 0);
    }
}
