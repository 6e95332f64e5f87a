//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    clock::Clock,
    database::Db,
    domain::{
        accounts::{
            PgAddressesRepository, PgPaymentMethodsRepository, PgPurchasesRepository,
            models::{AddressUuid, PaymentMethodUuid, PurchaseRecord, PurchaseRecordUuid, UserUuid},
        },
        carts::{PgCartItemsRepository, PgCartsRepository},
        catalog::PgCopiesRepository,
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderAdvance, OrderItem, OrderItemUuid, OrderUuid, order_total},
            repository::PgOrdersRepository,
            state::{OrderState, next_state},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
    copies_repository: PgCopiesRepository,
    addresses_repository: PgAddressesRepository,
    payment_methods_repository: PgPaymentMethodsRepository,
    purchases_repository: PgPurchasesRepository,
    clock: Arc<dyn Clock>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            copies_repository: PgCopiesRepository::new(),
            addresses_repository: PgAddressesRepository::new(),
            payment_methods_repository: PgPaymentMethodsRepository::new(),
            purchases_repository: PgPurchasesRepository::new(),
            clock,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        customer: UserUuid,
        address: AddressUuid,
        payment_method: PaymentMethodUuid,
    ) -> Result<Order, OrdersServiceError> {
        // Everything below runs in one transaction: dropping `tx` on any
        // early return rolls back copy flips, order rows, and the cart.
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_cart_for_customer(&mut tx, customer)
            .await?
            .ok_or(OrdersServiceError::EmptyCart)?;

        let cart_items = self
            .cart_items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        if cart_items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        if !self
            .addresses_repository
            .address_is_active(&mut tx, customer, address)
            .await?
        {
            return Err(OrdersServiceError::InvalidAddress);
        }

        if !self
            .payment_methods_repository
            .payment_method_is_active(&mut tx, customer, payment_method)
            .await?
        {
            return Err(OrdersServiceError::InvalidPayment);
        }

        for item in &cart_items {
            let rows_affected = self
                .copies_repository
                .mark_copy_unavailable(&mut tx, item.copy_uuid)
                .await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::Unavailable);
            }
        }

        let total = order_total(&cart_items);
        let created_at = self.clock.now();

        let order = self
            .repository
            .create_order(
                &mut tx,
                OrderUuid::new(),
                customer,
                address,
                payment_method,
                total,
                OrderState::Preparing,
                created_at,
            )
            .await?;

        let mut items = Vec::with_capacity(cart_items.len());

        for item in &cart_items {
            let uuid = OrderItemUuid::new();

            self.repository
                .create_order_item(
                    &mut tx,
                    uuid,
                    order.uuid,
                    item.copy_uuid,
                    item.quantity,
                    item.unit_price,
                )
                .await?;

            items.push(OrderItem {
                uuid,
                copy_uuid: item.copy_uuid,
                book_title: item.book_title.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            });
        }

        self.cart_items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.purchases_repository
            .append_purchase_record(
                &mut tx,
                &PurchaseRecord {
                    uuid: PurchaseRecordUuid::new(),
                    customer_uuid: customer,
                    order_uuid: order.uuid,
                    total,
                    purchased_at: created_at,
                    address_uuid: address,
                    payment_method_uuid: payment_method,
                    copy_codes: cart_items
                        .iter()
                        .map(|item| item.copy_uuid.into_uuid())
                        .collect(),
                },
            )
            .await?;

        tx.commit().await?;

        info!(order = %order.uuid, total, "checkout completed");

        Ok(Order {
            uuid: order.uuid,
            customer_uuid: order.customer_uuid,
            address_uuid: order.address_uuid,
            payment_method_uuid: order.payment_method_uuid,
            total: order.total,
            state: order.state,
            created_at: order.created_at,
            items,
        })
    }

    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = self
            .repository
            .list_orders_for_customer(&mut tx, customer)
            .await?;

        let mut orders = Vec::with_capacity(rows.len());

        for row in rows {
            let items = self.repository.get_order_items(&mut tx, row.uuid).await?;

            orders.push(Order {
                uuid: row.uuid,
                customer_uuid: row.customer_uuid,
                address_uuid: row.address_uuid,
                payment_method_uuid: row.payment_method_uuid,
                total: row.total,
                state: row.state,
                created_at: row.created_at,
                items,
            });
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn advance_orders(&self) -> Result<Vec<OrderAdvance>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let undelivered = self.repository.list_undelivered_orders(&mut tx).await?;
        let now = self.clock.now();

        let mut advanced = Vec::new();

        for order in undelivered {
            let Some(state) = next_state(order.state, order.created_at, now) else {
                continue;
            };

            self.repository
                .set_order_state(&mut tx, order.uuid, state)
                .await?;

            advanced.push(OrderAdvance {
                order_uuid: order.uuid,
                state,
            });
        }

        tx.commit().await?;

        if !advanced.is_empty() {
            info!("advanced {} orders", advanced.len());
        }

        Ok(advanced)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the customer's cart into an order: capture prices, flip every
    /// purchased copy unavailable, empty the cart, and append the purchase
    /// record, all as one unit.
    async fn checkout(
        &self,
        customer: UserUuid,
        address: AddressUuid,
        payment_method: PaymentMethodUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// The customer's orders, newest first, items included.
    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Apply due delivery-state transitions; one step per order per call.
    async fn advance_orders(&self) -> Result<Vec<OrderAdvance>, OrdersServiceError>;
}
