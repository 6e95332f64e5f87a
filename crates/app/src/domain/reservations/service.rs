//! Reservations service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    clock::Clock,
    database::Db,
    domain::{
        accounts::models::UserUuid,
        catalog::{PgCopiesRepository, models::CopyUuid},
        reservations::{
            errors::ReservationsServiceError,
            models::{Reservation, ReservationUuid, expiry_deadline},
            quota::ensure_within_quota,
            repository::PgReservationsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReservationsService {
    db: Db,
    repository: PgReservationsRepository,
    copies_repository: PgCopiesRepository,
    clock: Arc<dyn Clock>,
}

impl PgReservationsService {
    #[must_use]
    pub fn new(db: Db, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            repository: PgReservationsRepository::new(),
            copies_repository: PgCopiesRepository::new(),
            clock,
        }
    }
}

#[async_trait]
impl ReservationsService for PgReservationsService {
    async fn create_reservation(
        &self,
        customer: UserUuid,
        copy: CopyUuid,
    ) -> Result<Reservation, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let copy_row = self
            .copies_repository
            .get_copy(&mut tx, copy)
            .await?
            .ok_or(ReservationsServiceError::NotFound)?;

        if !copy_row.sellable() {
            return Err(ReservationsServiceError::Unavailable);
        }

        let active_total = self
            .repository
            .count_active_for_customer(&mut tx, customer)
            .await?;

        let active_for_book = self
            .repository
            .count_active_for_customer_book(&mut tx, customer, copy_row.book_uuid)
            .await?;

        ensure_within_quota(active_total, active_for_book)?;

        // Compare-and-swap on the availability flag; losing the race reads as
        // the copy simply not being available.
        let rows_affected = self
            .copies_repository
            .mark_copy_unavailable(&mut tx, copy)
            .await?;

        if rows_affected == 0 {
            return Err(ReservationsServiceError::Unavailable);
        }

        let created_at = self.clock.now();

        let reservation = self
            .repository
            .create_reservation(
                &mut tx,
                ReservationUuid::new(),
                customer,
                copy,
                created_at,
                expiry_deadline(created_at),
            )
            .await?;

        tx.commit().await?;

        Ok(reservation)
    }

    async fn cancel_reservation(
        &self,
        customer: UserUuid,
        reservation: ReservationUuid,
    ) -> Result<(), ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .get_reservation_for_customer(&mut tx, reservation, customer)
            .await?
            .ok_or(ReservationsServiceError::NotFound)?;

        // Idempotent via the active flag: cancelling twice is a no-op.
        if found.active {
            // The copy must be released before the reservation is closed, so
            // no state ever shows it both held and unreserved.
            self.copies_repository
                .mark_copy_available(&mut tx, found.copy_uuid)
                .await?;

            self.repository
                .deactivate_reservation(&mut tx, found.uuid)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_reservations(
        &self,
        customer: UserUuid,
        active: bool,
    ) -> Result<Vec<Reservation>, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let reservations = self
            .repository
            .list_reservations_for_customer(&mut tx, customer, active)
            .await?;

        tx.commit().await?;

        Ok(reservations)
    }

    async fn sweep_expired(&self) -> Result<u64, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let active = self.repository.list_active_reservations(&mut tx).await?;
        let now = self.clock.now();

        let mut released = 0_u64;

        for reservation in active {
            if !reservation.is_expired(now) {
                continue;
            }

            self.copies_repository
                .mark_copy_available(&mut tx, reservation.copy_uuid)
                .await?;

            self.repository
                .deactivate_reservation(&mut tx, reservation.uuid)
                .await?;

            released += 1;
        }

        tx.commit().await?;

        if released > 0 {
            info!("released {released} expired reservations");
        }

        Ok(released)
    }
}

#[automock]
#[async_trait]
pub trait ReservationsService: Send + Sync {
    /// Hold a copy for 24 hours. Fails `Unavailable` when the copy cannot be
    /// held and `QuotaExceeded` at the 5-total / 3-per-book ceilings.
    async fn create_reservation(
        &self,
        customer: UserUuid,
        copy: CopyUuid,
    ) -> Result<Reservation, ReservationsServiceError>;

    /// Release a held copy. Safe to repeat.
    async fn cancel_reservation(
        &self,
        customer: UserUuid,
        reservation: ReservationUuid,
    ) -> Result<(), ReservationsServiceError>;

    /// The customer's reservations, active or historical.
    async fn list_reservations(
        &self,
        customer: UserUuid,
        active: bool,
    ) -> Result<Vec<Reservation>, ReservationsServiceError>;

    /// Cancel every active reservation whose deadline has passed; returns the
    /// number released. Invoked on demand, never from a scheduler.
    async fn sweep_expired(&self) -> Result<u64, ReservationsServiceError>;
}
