//! Dispatcher: the orchestrating layer over the registries, the ride store,
//! the clock and the matching algorithm.
//!
//! Every operation runs inside one critical section guarded by a single
//! mutex. That makes each assignment transaction (snapshot available drivers,
//! pick one, commit request and driver together) atomic with respect to every
//! other mutation, including cancellation of the same request: whichever of
//! the two takes the lock first wins, and a cancel that comes second releases
//! the driver the assignment claimed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::clock::LogicalClock;
use crate::config::DispatchConfig;
use crate::drivers::DriverRegistry;
use crate::error::{DispatchError, DispatchResult};
use crate::matching::{
    build_matching_algorithm, Assignment, MatchingAlgorithm, MatchingAlgorithmType,
};
use crate::model::{
    Driver, DriverId, DriverStatus, Point, RideRequest, RideRequestId, Rider, RiderId,
};
use crate::rides::RideRequestStore;
use crate::riders::RiderRegistry;
use crate::telemetry::DispatchTelemetry;

#[derive(Debug, Default)]
struct DispatchState {
    drivers: DriverRegistry,
    riders: RiderRegistry,
    rides: RideRequestStore,
    clock: LogicalClock,
    telemetry: DispatchTelemetry,
}

impl DispatchState {
    /// Commit `driver_id` to the pending request `request_id`: the request
    /// becomes Assigned and the driver Busy, or nothing changes.
    fn commit_assignment(
        &mut self,
        request_id: &RideRequestId,
        driver_id: &DriverId,
    ) -> DispatchResult<RideRequest> {
        let now = self.clock.now();
        if !self.drivers.get(driver_id)?.is_available() {
            return Err(DispatchError::conflict(format!(
                "Driver {driver_id} is not available"
            )));
        }
        let request = self
            .rides
            .commit_assignment(request_id, driver_id, now)?
            .clone();
        self.drivers.set_status(driver_id, DriverStatus::Busy)?;
        self.telemetry.record_assigned();
        Ok(request)
    }

    /// Return a driver detached from a ride to the available pool.
    fn release_driver(&mut self, driver_id: &DriverId, request_id: &RideRequestId) {
        match self.drivers.set_status(driver_id, DriverStatus::Available) {
            Ok(()) => debug!(driver_id = %driver_id, request_id = %request_id, "driver released"),
            Err(err) => warn!(
                driver_id = %driver_id,
                request_id = %request_id,
                error = %err,
                "released driver is no longer registered"
            ),
        }
    }
}

pub struct Dispatcher {
    state: Mutex<DispatchState>,
    matcher: Box<dyn MatchingAlgorithm>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default(), MatchingAlgorithmType::default())
    }
}

impl Dispatcher {
    pub fn new(config: DispatchConfig, matching: MatchingAlgorithmType) -> Self {
        Self::with_algorithm(build_matching_algorithm(matching, &config))
    }

    pub fn with_algorithm(matcher: Box<dyn MatchingAlgorithm>) -> Self {
        Self {
            state: Mutex::new(DispatchState::default()),
            matcher,
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.matcher.name()
    }

    fn lock(&self) -> MutexGuard<'_, DispatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Drivers ─────────────────────────────────────────────────────

    pub fn register_driver(&self, name: impl Into<String>, position: Point) -> Driver {
        let driver = self.lock().drivers.register(name, position);
        info!(driver_id = %driver.id, x = position.x, y = position.y, "driver registered");
        driver
    }

    pub fn driver(&self, id: &DriverId) -> DispatchResult<Driver> {
        self.lock().drivers.get(id).cloned()
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.lock().drivers.list()
    }

    pub fn available_drivers(&self) -> Vec<Driver> {
        self.lock().drivers.list_available()
    }

    pub fn update_driver_position(&self, id: &DriverId, position: Point) -> DispatchResult<Driver> {
        let driver = self.lock().drivers.update_position(id, position)?.clone();
        debug!(driver_id = %id, x = position.x, y = position.y, "driver moved");
        Ok(driver)
    }

    /// Fails with Conflict while the driver is Busy.
    pub fn deregister_driver(&self, id: &DriverId) -> DispatchResult<Driver> {
        let driver = self.lock().drivers.deregister(id)?;
        info!(driver_id = %id, "driver deregistered");
        Ok(driver)
    }

    // ── Riders ──────────────────────────────────────────────────────

    pub fn register_rider(&self, name: impl Into<String>) -> Rider {
        let rider = self.lock().riders.create(name);
        info!(rider_id = %rider.id, "rider registered");
        rider
    }

    pub fn rider(&self, id: &RiderId) -> DispatchResult<Rider> {
        self.lock().riders.get(id).cloned()
    }

    pub fn riders(&self) -> Vec<Rider> {
        self.lock().riders.list()
    }

    /// Existing ride requests of the rider are left untouched.
    pub fn remove_rider(&self, id: &RiderId) -> DispatchResult<Rider> {
        let rider = self.lock().riders.delete(id)?;
        info!(rider_id = %id, "rider removed");
        Ok(rider)
    }

    // ── Ride requests ───────────────────────────────────────────────

    /// Create a ride request and try to assign it right away.
    ///
    /// The returned request is Assigned when a driver was available and
    /// Unassignable otherwise. Fails only when the rider does not exist.
    pub fn request_ride(
        &self,
        rider_id: &RiderId,
        pickup: Point,
        dropoff: Point,
    ) -> DispatchResult<RideRequest> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let now = state.clock.now();

        let request = state
            .rides
            .create(&state.riders, rider_id, pickup, dropoff, now)?;

        let candidates = state.drivers.list_available();
        let outcome = match self.matcher.assign(&request, &candidates) {
            Assignment::Assigned {
                driver_id,
                distance,
            } => {
                let committed = state.commit_assignment(&request.id, &driver_id);
                if committed.is_ok() {
                    info!(
                        request_id = %request.id,
                        driver_id = %driver_id,
                        distance,
                        candidates = candidates.len(),
                        algorithm = self.matcher.name(),
                        tick = now,
                        "ride request assigned"
                    );
                }
                committed
            }
            Assignment::Unassignable => {
                let marked = state.rides.mark_unassignable(&request.id, now).cloned();
                if marked.is_ok() {
                    state.telemetry.record_unassignable();
                    warn!(
                        request_id = %request.id,
                        tick = now,
                        "no driver available, ride request unassignable"
                    );
                }
                marked
            }
        };

        match &outcome {
            Ok(_) => state.telemetry.record_request(),
            Err(err) => {
                // Leave no half-finished request behind.
                match state.rides.delete(&request.id) {
                    Ok(_) => warn!(
                        request_id = %request.id,
                        error = %err,
                        "assignment failed, ride request rolled back"
                    ),
                    Err(delete_err) => warn!(
                        request_id = %request.id,
                        error = %err,
                        rollback_error = %delete_err,
                        "assignment failed and ride request rollback failed"
                    ),
                }
            }
        }
        outcome
    }

    /// Assign a specific driver to a pending ride request.
    ///
    /// Conflict when the request is no longer Pending or the driver is Busy.
    pub fn commit_assignment(
        &self,
        request_id: &RideRequestId,
        driver_id: &DriverId,
    ) -> DispatchResult<RideRequest> {
        let request = self.lock().commit_assignment(request_id, driver_id)?;
        info!(request_id = %request_id, driver_id = %driver_id, "ride request assigned");
        Ok(request)
    }

    pub fn ride(&self, id: &RideRequestId) -> DispatchResult<RideRequest> {
        self.lock().rides.get(id).cloned()
    }

    pub fn rides(&self) -> Vec<RideRequest> {
        self.lock().rides.list()
    }

    /// Assigned -> InProgress.
    pub fn start_ride(&self, id: &RideRequestId) -> DispatchResult<RideRequest> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let now = state.clock.now();
        let request = state.rides.start(id, now)?.clone();
        state.telemetry.record_started();
        info!(request_id = %id, tick = now, "ride started");
        Ok(request)
    }

    /// Assigned | InProgress -> Completed; the driver becomes Available again.
    pub fn complete_ride(&self, id: &RideRequestId) -> DispatchResult<RideRequest> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let now = state.clock.now();
        let driver_id = state.rides.complete(id, now)?;
        state.release_driver(&driver_id, id);
        state.telemetry.record_completed();
        info!(request_id = %id, driver_id = %driver_id, tick = now, "ride completed");
        state.rides.get(id).cloned()
    }

    /// Any non-terminal status -> Cancelled, releasing an attached driver.
    pub fn cancel_ride(&self, id: &RideRequestId) -> DispatchResult<RideRequest> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let now = state.clock.now();
        if let Some(driver_id) = state.rides.cancel(id, now)? {
            state.release_driver(&driver_id, id);
        }
        state.telemetry.record_cancelled();
        info!(request_id = %id, tick = now, "ride cancelled");
        state.rides.get(id).cloned()
    }

    /// Hard delete from any status. A driver still attached to the request
    /// is released first.
    pub fn delete_ride(&self, id: &RideRequestId) -> DispatchResult<RideRequest> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let removed = state.rides.delete(id)?;
        if let Some(driver_id) = removed.assigned_driver_id() {
            state.release_driver(driver_id, id);
        }
        info!(request_id = %id, status = %removed.status(), "ride request deleted");
        Ok(removed)
    }

    // ── Clock & telemetry ───────────────────────────────────────────

    /// Advance the logical clock by one and return the new time.
    pub fn tick(&self) -> u64 {
        let now = self.lock().clock.tick();
        debug!(tick = now, "clock advanced");
        now
    }

    pub fn now(&self) -> u64 {
        self.lock().clock.now()
    }

    pub fn telemetry(&self) -> DispatchTelemetry {
        self.lock().telemetry
    }
}
