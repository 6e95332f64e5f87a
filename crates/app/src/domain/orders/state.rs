//! Order delivery-state progression.
//!
//! Orders move `Preparing -> Shipped -> Delivered` on elapsed wall-clock
//! time, one step per evaluation. This stands in for a real logistics
//! signal; the thresholds are deliberately short.

use std::str::FromStr;

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

/// An order ships once this much time has passed since creation.
pub const SHIP_AFTER: SignedDuration = SignedDuration::from_secs(120);

/// An order is delivered once this much time has passed since creation.
pub const DELIVER_AFTER: SignedDuration = SignedDuration::from_secs(240);

/// Delivery state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderState {
    #[default]
    Preparing,
    Shipped,
    Delivered,
}

impl OrderState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparing => "PREPARING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
        }
    }
}

impl FromStr for OrderState {
    type Err = UnknownOrderState;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PREPARING" => Ok(Self::Preparing),
            "SHIPPED" => Ok(Self::Shipped),
            "DELIVERED" => Ok(Self::Delivered),
            other => Err(UnknownOrderState(other.to_string())),
        }
    }
}

/// State string not recognized when decoding.
#[derive(Debug, Clone, Error)]
#[error("unknown order state {0:?}")]
pub struct UnknownOrderState(pub String);

/// The single transition due at `now`, if any.
///
/// Transitions never skip a state: an order found `Preparing` long after
/// both thresholds still only ships on this evaluation and is delivered on
/// the next one. Below the due threshold the result is `None`, which makes
/// repeated evaluation idempotent; `Delivered` is terminal.
#[must_use]
pub fn next_state(state: OrderState, created_at: Timestamp, now: Timestamp) -> Option<OrderState> {
    let elapsed = now.duration_since(created_at);

    match state {
        OrderState::Preparing if elapsed >= SHIP_AFTER => Some(OrderState::Shipped),
        OrderState::Shipped if elapsed >= DELIVER_AFTER => Some(OrderState::Delivered),
        OrderState::Preparing | OrderState::Shipped | OrderState::Delivered => None,
    }
}
