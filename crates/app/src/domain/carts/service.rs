//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::models::UserUuid,
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItem, CartItemUuid, NewCartItem},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        catalog::PgCopiesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    copies_repository: PgCopiesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            copies_repository: PgCopiesRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, customer: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, customer)
            .await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(Cart {
            uuid: cart.uuid,
            customer_uuid: cart.customer_uuid,
            items,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        })
    }

    async fn add_item(
        &self,
        customer: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, customer)
            .await?;

        let copy = self
            .copies_repository
            .get_copy_with_title(&mut tx, item.copy_uuid)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if !copy.copy.sellable() {
            return Err(CartsServiceError::Unavailable);
        }

        // No quantity merge: a copy may appear at most once per cart.
        if self
            .items_repository
            .cart_item_exists(&mut tx, cart.uuid, item.copy_uuid.into_uuid())
            .await?
        {
            return Err(CartsServiceError::Duplicate);
        }

        let added_at = self
            .items_repository
            .create_cart_item(&mut tx, cart.uuid, &item)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(CartItem {
            uuid: item.uuid,
            copy_uuid: item.copy_uuid,
            book_title: copy.title,
            unit_price: copy.copy.price,
            quantity: item.quantity,
            added_at,
        })
    }

    async fn remove_item(
        &self,
        customer: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_cart_for_customer(&mut tx, customer)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The customer's cart, created lazily on first access.
    async fn get_cart(&self, customer: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Put a sellable copy in the cart. Fails `Unavailable` when the copy is
    /// held or exhausted and `Duplicate` when it is already present.
    async fn add_item(
        &self,
        customer: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError>;

    /// Drop an item owned by the customer's cart.
    async fn remove_item(
        &self,
        customer: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;
}
