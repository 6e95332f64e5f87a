//! Return Models

use std::str::FromStr;

use jiff::Timestamp;

use crate::{
    domain::{accounts::models::UserUuid, catalog::models::CopyUuid},
    uuids::TypedUuid,
};

/// Return UUID
pub type ReturnUuid = TypedUuid<Return>;

/// Why the customer is sending the copy back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCause {
    Damaged,
    NotAsExpected,
    ArrivedLate,
}

impl ReturnCause {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Damaged => "damaged",
            Self::NotAsExpected => "not_as_expected",
            Self::ArrivedLate => "arrived_late",
        }
    }
}

impl FromStr for ReturnCause {
    type Err = UnknownReturnCause;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "damaged" => Ok(Self::Damaged),
            "not_as_expected" => Ok(Self::NotAsExpected),
            "arrived_late" => Ok(Self::ArrivedLate),
            other => Err(UnknownReturnCause(other.to_string())),
        }
    }
}

/// Cause string not recognized when decoding.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown return cause {0:?}")]
pub struct UnknownReturnCause(pub String);

/// Return Model. The receipt is attached in a second step after the row is
/// persisted, so it may be absent.
#[derive(Debug, Clone)]
pub struct Return {
    pub uuid: ReturnUuid,
    pub customer_uuid: UserUuid,
    pub copy_uuid: CopyUuid,
    pub cause: ReturnCause,
    pub reason: String,
    pub requested_at: Timestamp,
    pub receipt_png: Option<Vec<u8>>,
}

/// New Return Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewReturn {
    pub uuid: ReturnUuid,
    pub copy_uuid: CopyUuid,
    pub cause: ReturnCause,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cause_round_trips_through_str() {
        for cause in [
            ReturnCause::Damaged,
            ReturnCause::NotAsExpected,
            ReturnCause::ArrivedLate,
        ] {
            assert_eq!(cause.as_str().parse::<ReturnCause>().ok(), Some(cause));
        }
    }
}
