//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{accounts::models::UserUuid, catalog::models::CopyUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart Model. Exactly one per customer, created lazily on first use.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub customer_uuid: UserUuid,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// Sum of item subtotals, computed on read.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}

/// CartItem Model. Price is the referenced copy's live price, never cached.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub copy_uuid: CopyUuid,
    pub book_title: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub added_at: Timestamp,
}

impl CartItem {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub copy_uuid: CopyUuid,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unit_price: u64, quantity: u32) -> CartItem {
        CartItem {
            uuid: CartItemUuid::new(),
            copy_uuid: CopyUuid::new(),
            book_title: "The Dispossessed".to_string(),
            unit_price,
            quantity,
            added_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn subtotal_multiplies_quantity_by_price() {
        assert_eq!(item(20_00, 2).subtotal(), 40_00);
    }

    #[test]
    fn cart_total_sums_item_subtotals() {
        let cart = Cart {
            uuid: CartUuid::new(),
            customer_uuid: UserUuid::new(),
            items: vec![item(20_00, 2), item(15_00, 1)],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(cart.total(), 55_00);
    }
}
