//! Driver registry: every registered driver with its position and status.

use crate::error::{DispatchError, DispatchResult, EntityKind};
use crate::model::{Driver, DriverId, DriverStatus, Point};
use crate::store::OrderedStore;

#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: OrderedStore<DriverId, Driver>,
}

impl DriverRegistry {
    /// New drivers start Available.
    pub fn register(&mut self, name: impl Into<String>, position: Point) -> Driver {
        let driver = Driver {
            id: DriverId::generate(),
            name: name.into(),
            position,
            status: DriverStatus::Available,
        };
        self.drivers.insert(driver.id.clone(), driver.clone());
        driver
    }

    pub fn get(&self, id: &DriverId) -> DispatchResult<&Driver> {
        self.drivers
            .get(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::Driver, id))
    }

    pub fn contains(&self, id: &DriverId) -> bool {
        self.drivers.contains(id)
    }

    /// All drivers in registration order.
    pub fn list(&self) -> Vec<Driver> {
        self.drivers.values().cloned().collect()
    }

    /// Available drivers in registration order; the candidate snapshot for assignment.
    pub fn list_available(&self) -> Vec<Driver> {
        self.drivers
            .values()
            .filter(|driver| driver.is_available())
            .cloned()
            .collect()
    }

    pub fn set_status(&mut self, id: &DriverId, status: DriverStatus) -> DispatchResult<()> {
        let driver = self
            .drivers
            .get_mut(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::Driver, id))?;
        driver.status = status;
        Ok(())
    }

    pub fn update_position(&mut self, id: &DriverId, position: Point) -> DispatchResult<&Driver> {
        let driver = self
            .drivers
            .get_mut(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::Driver, id))?;
        driver.position = position;
        Ok(&*driver)
    }

    /// Busy drivers cannot be removed while their assignment is active.
    pub fn deregister(&mut self, id: &DriverId) -> DispatchResult<Driver> {
        let driver = self.get(id)?;
        if driver.status == DriverStatus::Busy {
            return Err(DispatchError::conflict(
                "Driver is busy with an active ride request",
            ));
        }
        self.drivers
            .remove(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::Driver, id))
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}
