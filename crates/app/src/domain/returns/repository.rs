//! Returns Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    catalog::models::CopyUuid,
    returns::models::{Return, ReturnCause, ReturnUuid},
};

const CREATE_RETURN_SQL: &str = include_str!("sql/create_return.sql");
const ATTACH_RECEIPT_SQL: &str = include_str!("sql/attach_receipt.sql");
const LIST_RETURNS_FOR_CUSTOMER_SQL: &str = include_str!("sql/list_returns_for_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReturnsRepository;

impl PgReturnsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[expect(clippy::too_many_arguments, reason = "flat column list for the insert")]
    pub(crate) async fn create_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ReturnUuid,
        customer: UserUuid,
        copy: CopyUuid,
        cause: ReturnCause,
        reason: &str,
        requested_at: Timestamp,
    ) -> Result<Return, sqlx::Error> {
        query_as::<Postgres, Return>(CREATE_RETURN_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(copy.into_uuid())
            .bind(cause.as_str())
            .bind(reason)
            .bind(SqlxTimestamp::from(requested_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn attach_receipt(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ret: ReturnUuid,
        receipt_png: &[u8],
    ) -> Result<(), sqlx::Error> {
        query(ATTACH_RECEIPT_SQL)
            .bind(ret.into_uuid())
            .bind(receipt_png)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_returns_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<Vec<Return>, sqlx::Error> {
        query_as::<Postgres, Return>(LIST_RETURNS_FOR_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Return {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let cause_raw: String = row.try_get("cause")?;
        let cause = ReturnCause::from_str(&cause_raw).map_err(|e| sqlx::Error::ColumnDecode {
            index: "cause".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            copy_uuid: row.try_get::<Uuid, _>("copy_uuid")?.into(),
            cause,
            reason: row.try_get("reason")?,
            requested_at: row.try_get::<SqlxTimestamp, _>("requested_at")?.to_jiff(),
            receipt_png: row.try_get("receipt_png")?,
        })
    }
}
