//! Test helpers for building drivers and ride requests with fixed ids.
//!
//! Fixed ids make tie-break expectations readable; production code always
//! goes through the registries, which generate ids.

use crate::model::{
    Driver, DriverId, DriverStatus, Point, RideRequest, RideRequestId, RideStatus, RideTiming,
    RiderId,
};

/// An Available driver with the given id and position.
pub fn driver_at(id: &str, x: f64, y: f64) -> Driver {
    Driver {
        id: DriverId::from(id),
        name: format!("driver-{id}"),
        position: Point::new(x, y),
        status: DriverStatus::Available,
    }
}

/// A Pending ride request picking up at (x, y), dropping off at the origin.
pub fn request_at(x: f64, y: f64) -> RideRequest {
    RideRequest {
        id: RideRequestId::from("request"),
        rider_id: RiderId::from("rider"),
        pickup: Point::new(x, y),
        dropoff: Point::default(),
        status: RideStatus::Pending,
        assigned_driver_id: None,
        timing: RideTiming::default(),
    }
}

/// Brute-force reference for the nearest-driver rule: sort by (squared
/// distance, id) and take the first. Squared distances are exact for small
/// grid coordinates, so exact ties land on the smallest id.
pub fn reference_nearest(pickup: Point, candidates: &[Driver]) -> Option<DriverId> {
    let mut scored: Vec<(f64, &DriverId)> = candidates
        .iter()
        .map(|driver| {
            let dx = driver.position.x - pickup.x;
            let dy = driver.position.y - pickup.y;
            (dx * dx + dy * dy, &driver.id)
        })
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored.first().map(|(_, id)| (*id).clone())
}
