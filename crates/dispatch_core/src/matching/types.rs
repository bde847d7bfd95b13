use crate::model::DriverId;

/// Outcome of evaluating one ride request against the candidate drivers.
///
/// `Unassignable` is a normal result meaning no candidate was available; the
/// caller may retry later.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Assigned {
        driver_id: DriverId,
        /// Euclidean distance from the driver to the pickup point.
        distance: f64,
    },
    Unassignable,
}

impl Assignment {
    pub fn driver_id(&self) -> Option<&DriverId> {
        match self {
            Assignment::Assigned { driver_id, .. } => Some(driver_id),
            Assignment::Unassignable => None,
        }
    }

    pub fn is_unassignable(&self) -> bool {
        matches!(self, Assignment::Unassignable)
    }
}
