//! Reservations Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    catalog::models::{BookUuid, CopyUuid},
    reservations::models::{Reservation, ReservationUuid},
};

const CREATE_RESERVATION_SQL: &str = include_str!("sql/create_reservation.sql");
const GET_RESERVATION_FOR_CUSTOMER_SQL: &str =
    include_str!("sql/get_reservation_for_customer.sql");
const LIST_RESERVATIONS_FOR_CUSTOMER_SQL: &str =
    include_str!("sql/list_reservations_for_customer.sql");
const LIST_ACTIVE_RESERVATIONS_SQL: &str = include_str!("sql/list_active_reservations.sql");
const DEACTIVATE_RESERVATION_SQL: &str = include_str!("sql/deactivate_reservation.sql");
const COUNT_ACTIVE_FOR_CUSTOMER_SQL: &str = include_str!("sql/count_active_for_customer.sql");
const COUNT_ACTIVE_FOR_CUSTOMER_BOOK_SQL: &str =
    include_str!("sql/count_active_for_customer_book.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReservationsRepository;

impl PgReservationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_reservation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ReservationUuid,
        customer: UserUuid,
        copy: CopyUuid,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Reservation, sqlx::Error> {
        query_as::<Postgres, Reservation>(CREATE_RESERVATION_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(copy.into_uuid())
            .bind(SqlxTimestamp::from(created_at))
            .bind(SqlxTimestamp::from(expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_reservation_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation: ReservationUuid,
        customer: UserUuid,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        query_as::<Postgres, Reservation>(GET_RESERVATION_FOR_CUSTOMER_SQL)
            .bind(reservation.into_uuid())
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_reservations_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        active: bool,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        query_as::<Postgres, Reservation>(LIST_RESERVATIONS_FOR_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .bind(active)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_active_reservations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        query_as::<Postgres, Reservation>(LIST_ACTIVE_RESERVATIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_reservation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reservation: ReservationUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_RESERVATION_SQL)
            .bind(reservation.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_active_for_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let row: (i64,) = query_as(COUNT_ACTIVE_FOR_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0.unsigned_abs())
    }

    pub(crate) async fn count_active_for_customer_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: UserUuid,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let row: (i64,) = query_as(COUNT_ACTIVE_FOR_CUSTOMER_BOOK_SQL)
            .bind(customer.into_uuid())
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0.unsigned_abs())
    }
}

impl<'r> FromRow<'r, PgRow> for Reservation {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get::<Uuid, _>("uuid")?.into(),
            customer_uuid: row.try_get::<Uuid, _>("customer_uuid")?.into(),
            copy_uuid: row.try_get::<Uuid, _>("copy_uuid")?.into(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            active: row.try_get("active")?,
        })
    }
}
