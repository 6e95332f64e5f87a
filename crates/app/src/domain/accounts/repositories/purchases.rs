//! Purchase History Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::accounts::models::{PurchaseRecord, UserUuid},
};

const APPEND_PURCHASE_RECORD_SQL: &str = include_str!("../sql/append_purchase_record.sql");
const LIST_PURCHASE_RECORDS_SQL: &str = include_str!("../sql/list_purchase_records.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPurchasesRepository;

impl PgPurchasesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn append_purchase_record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &PurchaseRecord,
    ) -> Result<(), sqlx::Error> {
        let total = i64::try_from(record.total).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query(APPEND_PURCHASE_RECORD_SQL)
            .bind(record.uuid.into_uuid())
            .bind(record.customer_uuid.into_uuid())
            .bind(record.order_uuid.into_uuid())
            .bind(total)
            .bind(SqlxTimestamp::from(record.purchased_at))
            .bind(record.address_uuid.into_uuid())
            .bind(record.payment_method_uuid.into_uuid())
            .bind(&record.copy_codes)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_purchase_records(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<PurchaseRecord>, sqlx::Error> {
        query_as::<Postgres, PurchaseRecord>(LIST_PURCHASE_RECORDS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PurchaseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            order_uuid: row.try_get::<Uuid, _>("order_uuid")?.into(),
            total: try_get_amount(row, "total")?,
            purchased_at: row.try_get::<SqlxTimestamp, _>("purchased_at")?.to_jiff(),
            address_uuid: row.try_get::<Uuid, _>("address_uuid")?.into(),
            payment_method_uuid: row.try_get::<Uuid, _>("payment_method_uuid")?.into(),
            copy_codes: row.try_get("copy_codes")?,
        })
    }
}
