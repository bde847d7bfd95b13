//! Rider registry. Removing a rider does not touch ride requests that
//! reference it.

use crate::error::{DispatchError, DispatchResult, EntityKind};
use crate::model::{Rider, RiderId};
use crate::store::OrderedStore;

#[derive(Debug, Default)]
pub struct RiderRegistry {
    riders: OrderedStore<RiderId, Rider>,
}

impl RiderRegistry {
    pub fn create(&mut self, name: impl Into<String>) -> Rider {
        let rider = Rider {
            id: RiderId::generate(),
            name: name.into(),
        };
        self.riders.insert(rider.id.clone(), rider.clone());
        rider
    }

    pub fn get(&self, id: &RiderId) -> DispatchResult<&Rider> {
        self.riders
            .get(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::Rider, id))
    }

    pub fn list(&self) -> Vec<Rider> {
        self.riders.values().cloned().collect()
    }

    pub fn delete(&mut self, id: &RiderId) -> DispatchResult<Rider> {
        self.riders
            .remove(id)
            .ok_or_else(|| DispatchError::not_found(EntityKind::Rider, id))
    }

    pub fn len(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }
}
