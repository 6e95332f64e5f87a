//! Orders Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::{
        accounts::models::{AddressUuid, PaymentMethodUuid, UserUuid},
        catalog::models::CopyUuid,
        orders::{
            models::{OrderItem, OrderItemUuid, OrderUuid},
            state::OrderState,
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDERS_FOR_CUSTOMER_SQL: &str = include_str!("sql/list_orders_for_customer.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const LIST_UNDELIVERED_ORDERS_SQL: &str = include_str!("sql/list_undelivered_orders.sql");
const SET_ORDER_STATE_SQL: &str = include_str!("sql/set_order_state.sql");
const FIND_ORDER_FOR_CUSTOMER_COPY_SQL: &str =
    include_str!("sql/find_order_for_customer_copy.sql");

/// Order row without its items.
#[derive(Debug, Clone)]
pub(crate) struct OrderRow {
    pub uuid: OrderUuid,
    pub customer_uuid: UserUuid,
    pub address_uuid: AddressUuid,
    pub payment_method_uuid: PaymentMethodUuid,
    pub total: u64,
    pub state: OrderState,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[expect(clippy::too_many_arguments, reason = "flat column list for the insert")]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        customer: UserUuid,
        address: AddressUuid,
        payment_method: PaymentMethodUuid,
        total: u64,
        state: OrderState,
        created_at: Timestamp,
    ) -> Result<OrderRow, sqlx::Error> {
        let total = i64::try_from(total).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, OrderRow>(CREATE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(address.into_uuid())
            .bind(payment_method.into_uuid())
            .bind(total)
            .bind(state.as_str())
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderItemUuid,
        order: OrderUuid,
        copy: CopyUuid,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), sqlx::Error> {
        let unit_price =
            i64::try_from(unit_price).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query(CREATE_ORDER_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(copy.into_uuid())
            .bind(i64::from(quantity))
            .bind(unit_price)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_orders_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(LIST_ORDERS_FOR_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_undelivered_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRow>, sqlx::Error> {
        query_as::<Postgres, OrderRow>(LIST_UNDELIVERED_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_order_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        state: OrderState,
    ) -> Result<(), sqlx::Error> {
        query(SET_ORDER_STATE_SQL)
            .bind(order.into_uuid())
            .bind(state.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// The most recent order of this customer containing the copy, if any.
    pub(crate) async fn find_order_for_customer_copy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        copy: CopyUuid,
    ) -> Result<Option<OrderUuid>, sqlx::Error> {
        let row: Option<(Uuid,)> = query_as(FIND_ORDER_FOR_CUSTOMER_COPY_SQL)
            .bind(customer.into_uuid())
            .bind(copy.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|(uuid,)| uuid.into()))
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let state_raw: String = row.try_get("state")?;
        let state = OrderState::from_str(&state_raw).map_err(|e| sqlx::Error::ColumnDecode {
            index: "state".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            address_uuid: row.try_get::<Uuid, _>("address_uuid")?.into(),
            payment_method_uuid: row.try_get::<Uuid, _>("payment_method_uuid")?.into(),
            total: try_get_amount(row, "total")?,
            state,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            copy_uuid: row.try_get::<Uuid, _>("copy_uuid")?.into(),
            book_title: row.try_get("book_title")?,
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
        })
    }
}
