//! Payment Methods Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::accounts::models::{
    NewPaymentMethod, PaymentMethod, PaymentMethodUuid, UserUuid,
};

const LIST_PAYMENT_METHODS_SQL: &str = include_str!("../sql/list_payment_methods.sql");
const CREATE_PAYMENT_METHOD_SQL: &str = include_str!("../sql/create_payment_method.sql");
const DEACTIVATE_PAYMENT_METHOD_SQL: &str = include_str!("../sql/deactivate_payment_method.sql");
const PAYMENT_METHOD_IS_ACTIVE_SQL: &str = include_str!("../sql/payment_method_is_active.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentMethodsRepository;

impl PgPaymentMethodsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_payment_methods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<PaymentMethod>, sqlx::Error> {
        query_as::<Postgres, PaymentMethod>(LIST_PAYMENT_METHODS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        method: &NewPaymentMethod,
    ) -> Result<PaymentMethod, sqlx::Error> {
        query_as::<Postgres, PaymentMethod>(CREATE_PAYMENT_METHOD_SQL)
            .bind(method.uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(&method.card_number)
            .bind(&method.holder_name)
            .bind(SqlxDate::from(method.expires))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        method: PaymentMethodUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_PAYMENT_METHOD_SQL)
            .bind(method.into_uuid())
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn payment_method_is_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        method: PaymentMethodUuid,
    ) -> Result<bool, sqlx::Error> {
        let row = query_as::<Postgres, (bool,)>(PAYMENT_METHOD_IS_ACTIVE_SQL)
            .bind(method.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentMethod {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            card_number: row.try_get("card_number")?,
            holder_name: row.try_get("holder_name")?,
            expires: row.try_get::<SqlxDate, _>("expires")?.to_jiff(),
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
