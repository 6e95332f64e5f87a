//! Copies Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::catalog::models::{BookUuid, Copy, CopyCondition, CopyUuid},
};

const LIST_COPIES_FOR_BOOK_SQL: &str = include_str!("../sql/list_copies_for_book.sql");
const LIST_SELLABLE_COPIES_FOR_BOOK_SQL: &str =
    include_str!("../sql/list_sellable_copies_for_book.sql");
const CREATE_COPY_SQL: &str = include_str!("../sql/create_copy.sql");
const GET_COPY_SQL: &str = include_str!("../sql/get_copy.sql");
const GET_COPY_WITH_TITLE_SQL: &str = include_str!("../sql/get_copy_with_title.sql");
const MARK_COPY_UNAVAILABLE_SQL: &str = include_str!("../sql/mark_copy_unavailable.sql");
const MARK_COPY_AVAILABLE_SQL: &str = include_str!("../sql/mark_copy_available.sql");
const LIST_EXHAUSTED_COPIES_SQL: &str = include_str!("../sql/list_exhausted_copies.sql");

/// Copy row joined with its book title.
#[derive(Debug, Clone)]
pub(crate) struct CopyWithTitle {
    pub copy: Copy,
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCopiesRepository;

impl PgCopiesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_copies_for_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<Vec<Copy>, sqlx::Error> {
        query_as::<Postgres, Copy>(LIST_COPIES_FOR_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_sellable_copies_for_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<Vec<Copy>, sqlx::Error> {
        query_as::<Postgres, Copy>(LIST_SELLABLE_COPIES_FOR_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_copy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CopyUuid,
        book: BookUuid,
        condition: CopyCondition,
        price: u64,
    ) -> Result<Copy, sqlx::Error> {
        let price = i64::try_from(price).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, Copy>(CREATE_COPY_SQL)
            .bind(uuid.into_uuid())
            .bind(book.into_uuid())
            .bind(condition.as_str())
            .bind(price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_copy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        copy: CopyUuid,
    ) -> Result<Option<Copy>, sqlx::Error> {
        query_as::<Postgres, Copy>(GET_COPY_SQL)
            .bind(copy.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_copy_with_title(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        copy: CopyUuid,
    ) -> Result<Option<CopyWithTitle>, sqlx::Error> {
        query_as::<Postgres, CopyWithTitle>(GET_COPY_WITH_TITLE_SQL)
            .bind(copy.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Compare-and-swap the availability flag. Zero rows affected means the
    /// copy was already held or exhausted, so the caller lost the race.
    pub(crate) async fn mark_copy_unavailable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        copy: CopyUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_COPY_UNAVAILABLE_SQL)
            .bind(copy.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn mark_copy_available(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        copy: CopyUuid,
    ) -> Result<(), sqlx::Error> {
        query(MARK_COPY_AVAILABLE_SQL)
            .bind(copy.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_exhausted_copies(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Copy>, sqlx::Error> {
        query_as::<Postgres, Copy>(LIST_EXHAUSTED_COPIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Copy {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let condition_raw: String = row.try_get("condition")?;
        let condition =
            CopyCondition::from_str(&condition_raw).map_err(|e| sqlx::Error::ColumnDecode {
                index: "condition".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            book_uuid: row.try_get::<Uuid, _>("book_uuid")?.into(),
            condition,
            price: try_get_amount(row, "price")?,
            available: row.try_get("available")?,
            exhausted: row.try_get("exhausted")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CopyWithTitle {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            copy: Copy::from_row(row)?,
            title: row.try_get("title")?,
        })
    }
}
