//! Error type shared by every store and the dispatcher.
//!
//! `Unassignable` is deliberately absent: failing to find a driver is a valid
//! outcome recorded on the ride request, not an error.

use std::fmt;

use thiserror::Error;

/// Which kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Driver,
    Rider,
    RideRequest,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Driver => "Driver",
            EntityKind::Rider => "Rider",
            EntityKind::RideRequest => "Ride request",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The referenced entity id does not exist.
    #[error("{kind} not found")]
    NotFound { kind: EntityKind, id: String },

    /// The operation would violate a state invariant.
    #[error("{0}")]
    Conflict(String),
}

impl DispatchError {
    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
