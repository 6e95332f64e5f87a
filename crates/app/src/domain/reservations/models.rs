//! Reservation Models

use jiff::{SignedDuration, Timestamp};

use crate::{
    domain::{accounts::models::UserUuid, catalog::models::CopyUuid},
    uuids::TypedUuid,
};

/// Reservation UUID
pub type ReservationUuid = TypedUuid<Reservation>;

/// A reservation holds a copy out of sale for a bounded window.
pub const RESERVATION_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Reservation Model
#[derive(Debug, Clone)]
pub struct Reservation {
    pub uuid: ReservationUuid,
    pub customer_uuid: UserUuid,
    pub copy_uuid: CopyUuid,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub active: bool,
}

impl Reservation {
    /// Expired means the deadline has been reached, not merely approached.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Deadline for a reservation created at the given instant.
#[must_use]
pub fn expiry_deadline(created_at: Timestamp) -> Timestamp {
    created_at.saturating_add(RESERVATION_TTL).unwrap()
}
