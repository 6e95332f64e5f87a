//! Reservation quota rules.

use crate::domain::reservations::errors::ReservationsServiceError;

/// A customer may hold at most this many active reservations.
pub const MAX_ACTIVE_RESERVATIONS: u64 = 5;

/// At most this many active reservations for copies of one book.
pub const MAX_ACTIVE_PER_BOOK: u64 = 3;

/// Check both ceilings against the customer's current active counts.
///
/// # Errors
///
/// Returns `QuotaExceeded` when creating one more reservation would pass
/// either ceiling.
pub fn ensure_within_quota(
    active_total: u64,
    active_for_book: u64,
) -> Result<(), ReservationsServiceError> {
    if active_total >= MAX_ACTIVE_RESERVATIONS || active_for_book >= MAX_ACTIVE_PER_BOOK {
        return Err(ReservationsServiceError::QuotaExceeded);
    }

    Ok(())
}
