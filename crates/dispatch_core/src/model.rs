//! Data model: identifiers, positions, drivers, riders and ride requests.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh time-ordered identifier.
            pub fn generate() -> Self {
                Self(uuid7::uuid7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(
    /// Opaque driver identifier. Ordering is plain string ordering, which the
    /// assignment tie-break relies on.
    DriverId
);
entity_id!(RiderId);
entity_id!(RideRequestId);

/// A point on the flat 2-D plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Available,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub position: Point,
    pub status: DriverStatus,
}

impl Driver {
    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    Unassignable,
}

impl RideStatus {
    /// Completed, Cancelled and Unassignable accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RideStatus::Completed | RideStatus::Cancelled | RideStatus::Unassignable
        )
    }

    /// Statuses in which a driver is attached to the request.
    pub fn holds_driver(self) -> bool {
        matches!(self, RideStatus::Assigned | RideStatus::InProgress)
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RideStatus::Pending => "pending",
            RideStatus::Assigned => "assigned",
            RideStatus::InProgress => "in_progress",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
            RideStatus::Unassignable => "unassignable",
        };
        f.write_str(label)
    }
}

/// Logical clock values at which a ride request went through each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RideTiming {
    pub requested_at: u64,
    pub assigned_at: Option<u64>,
    pub started_at: Option<u64>,
    pub completed_at: Option<u64>,
    pub cancelled_at: Option<u64>,
    pub unassignable_at: Option<u64>,
}

/// A rider's request for a trip.
///
/// `assigned_driver_id` is `Some` exactly when `status` is Assigned or
/// InProgress. Status and driver are only changed through
/// [`RideRequestStore`](crate::rides::RideRequestStore), which keeps them in step.
/// Output-only: requests are constructed by the store, never parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideRequest {
    pub id: RideRequestId,
    pub rider_id: RiderId,
    pub pickup: Point,
    pub dropoff: Point,
    pub(crate) status: RideStatus,
    pub(crate) assigned_driver_id: Option<DriverId>,
    pub(crate) timing: RideTiming,
}

impl RideRequest {
    pub fn status(&self) -> RideStatus {
        self.status
    }

    pub fn assigned_driver_id(&self) -> Option<&DriverId> {
        self.assigned_driver_id.as_ref()
    }

    pub fn timing(&self) -> &RideTiming {
        &self.timing
    }
}
