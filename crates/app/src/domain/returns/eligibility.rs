//! Return-eligibility rules.
//!
//! Eligibility reads the customer's purchase-history log, not the order
//! tables. The log is the contractual source of truth here; the service
//! surfaces a warning when the two disagree instead of silently trusting
//! either side.

use jiff::{SignedDuration, Timestamp};

use crate::domain::{accounts::models::PurchaseRecord, orders::models::OrderUuid};

/// A purchase can be returned for this long after it was made.
pub const RETURN_WINDOW: SignedDuration = SignedDuration::from_hours(8 * 24);

/// Outcome of the purchase-history scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// A log entry for the order exists and is inside the window.
    Eligible,
    /// The order is absent from the log even though the order tables know
    /// it; the two have diverged.
    MissingFromLog,
    /// The newest matching log entry is older than the window.
    WindowClosed,
}

/// Scan the log for an entry matching the order and check its age.
#[must_use]
pub fn check_return_window(
    records: &[PurchaseRecord],
    order: OrderUuid,
    now: Timestamp,
) -> Eligibility {
    let mut found = false;

    for record in records {
        if record.order_uuid != order {
            continue;
        }

        found = true;

        if now.duration_since(record.purchased_at) <= RETURN_WINDOW {
            return Eligibility::Eligible;
        }
    }

    if found {
        Eligibility::WindowClosed
    } else {
        Eligibility::MissingFromLog
    }
}
