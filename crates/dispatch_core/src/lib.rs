//! Ride dispatch core: driver and rider registries, the ride request store,
//! and the assignment engine that pairs each request with the nearest
//! available driver.
//!
//! All mutable state lives inside [`dispatcher::Dispatcher`], which serializes
//! every mutation (and every assign-then-commit transaction) through a single
//! lock. The individual stores are plain owned structs without interior
//! synchronization.

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod drivers;
pub mod error;
pub mod matching;
pub mod model;
pub mod rides;
pub mod riders;
pub mod store;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::DispatchConfig;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult, EntityKind};
pub use model::{
    Driver, DriverId, DriverStatus, Point, RideRequest, RideRequestId, RideStatus, RideTiming,
    Rider, RiderId,
};
