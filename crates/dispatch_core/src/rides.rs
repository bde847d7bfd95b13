//! Ride request store. Owns every lifecycle transition:
//!
//! ```text
//! Pending --commit_assignment--> Assigned --start--> InProgress --complete--> Completed
//! Pending --mark_unassignable--> Unassignable
//! Pending | Assigned | InProgress --cancel--> Cancelled
//! ```
//!
//! Transitions only touch the request. Releasing or claiming the driver is the
//! caller's half of the transaction; methods that detach a driver return its id.

use crate::error::{DispatchError, DispatchResult, EntityKind};
use crate::model::{DriverId, Point, RideRequest, RideRequestId, RideStatus, RideTiming, RiderId};
use crate::riders::RiderRegistry;
use crate::store::OrderedStore;

#[derive(Debug, Default)]
pub struct RideRequestStore {
    requests: OrderedStore<RideRequestId, RideRequest>,
}

impl RideRequestStore {
    /// The rider must exist now; later rider deletion leaves the request alone.
    pub fn create(
        &mut self,
        riders: &RiderRegistry,
        rider_id: &RiderId,
        pickup: Point,
        dropoff: Point,
        now: u64,
    ) -> DispatchResult<RideRequest> {
        riders.get(rider_id)?;
        let request = RideRequest {
            id: RideRequestId::generate(),
            rider_id: rider_id.clone(),
            pickup,
            dropoff,
            status: RideStatus::Pending,
            assigned_driver_id: None,
            timing: RideTiming {
                requested_at: now,
                ..RideTiming::default()
            },
        };
        self.requests.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    pub fn get(&self, id: &RideRequestId) -> DispatchResult<&RideRequest> {
        self.requests
            .get(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::RideRequest, id))
    }

    pub fn list(&self) -> Vec<RideRequest> {
        self.requests.values().cloned().collect()
    }

    /// Hard delete from any status.
    pub fn delete(&mut self, id: &RideRequestId) -> DispatchResult<RideRequest> {
        self.requests
            .remove(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::RideRequest, id))
    }

    /// Pending -> Assigned. A request that already left Pending is a conflict,
    /// which is what stops a second assignment of the same request.
    pub fn commit_assignment(
        &mut self,
        id: &RideRequestId,
        driver_id: &DriverId,
        now: u64,
    ) -> DispatchResult<&RideRequest> {
        let request = self.get_mut(id)?;
        expect_status(request, &[RideStatus::Pending], "assign")?;
        request.status = RideStatus::Assigned;
        request.assigned_driver_id = Some(driver_id.clone());
        request.timing.assigned_at = Some(now);
        Ok(&*request)
    }

    /// Pending -> Unassignable.
    pub fn mark_unassignable(
        &mut self,
        id: &RideRequestId,
        now: u64,
    ) -> DispatchResult<&RideRequest> {
        let request = self.get_mut(id)?;
        expect_status(request, &[RideStatus::Pending], "mark unassignable")?;
        request.status = RideStatus::Unassignable;
        request.timing.unassignable_at = Some(now);
        Ok(&*request)
    }

    /// Assigned -> InProgress.
    pub fn start(&mut self, id: &RideRequestId, now: u64) -> DispatchResult<&RideRequest> {
        let request = self.get_mut(id)?;
        expect_status(request, &[RideStatus::Assigned], "start")?;
        request.status = RideStatus::InProgress;
        request.timing.started_at = Some(now);
        Ok(&*request)
    }

    /// Assigned | InProgress -> Completed. Returns the driver to release.
    pub fn complete(&mut self, id: &RideRequestId, now: u64) -> DispatchResult<DriverId> {
        let request = self.get_mut(id)?;
        expect_status(
            request,
            &[RideStatus::Assigned, RideStatus::InProgress],
            "complete",
        )?;
        let driver_id = detach_driver(request)?;
        request.status = RideStatus::Completed;
        request.timing.completed_at = Some(now);
        Ok(driver_id)
    }

    /// Any non-terminal status -> Cancelled. Returns the driver to release, if
    /// one was attached.
    pub fn cancel(&mut self, id: &RideRequestId, now: u64) -> DispatchResult<Option<DriverId>> {
        let request = self.get_mut(id)?;
        if request.status.is_terminal() {
            return Err(invalid_transition(request, "cancel"));
        }
        let released = request.assigned_driver_id.take();
        request.status = RideStatus::Cancelled;
        request.timing.cancelled_at = Some(now);
        Ok(released)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn get_mut(&mut self, id: &RideRequestId) -> DispatchResult<&mut RideRequest> {
        self.requests
            .get_mut(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::RideRequest, id))
    }
}

fn expect_status(
    request: &RideRequest,
    allowed: &[RideStatus],
    action: &str,
) -> DispatchResult<()> {
    if allowed.contains(&request.status) {
        Ok(())
    } else {
        Err(invalid_transition(request, action))
    }
}

fn invalid_transition(request: &RideRequest, action: &str) -> DispatchError {
    DispatchError::conflict(format!(
        "Cannot {action} ride request {} in status {}",
        request.id, request.status
    ))
}

fn detach_driver(request: &mut RideRequest) -> DispatchResult<DriverId> {
    request.assigned_driver_id.take().ok_or_else(|| {
        DispatchError::conflict(format!(
            "Ride request {} has no assigned driver",
            request.id
        ))
    })
}
