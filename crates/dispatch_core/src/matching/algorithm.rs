use crate::model::{Driver, RideRequest};

use super::types::Assignment;

/// Trait for algorithms that pick a driver for a ride request.
///
/// Implementations are pure: they read the request and the candidate snapshot
/// and never mutate anything. Committing the result is the dispatcher's job.
///
/// # Examples
///
/// ```rust
/// use dispatch_core::matching::{MatchingAlgorithm, NearestDriverMatching};
/// use dispatch_core::test_helpers::{driver_at, request_at};
///
/// let algorithm = NearestDriverMatching::default();
/// let candidates = vec![driver_at("far", 10.0, 10.0), driver_at("near", 0.0, 0.0)];
/// let assignment = algorithm.assign(&request_at(1.0, 1.0), &candidates);
/// assert_eq!(assignment.driver_id().map(|id| id.as_str()), Some("near"));
/// ```
pub trait MatchingAlgorithm: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Choose a driver for `request`.
    ///
    /// # Arguments
    ///
    /// * `request` - The ride request; only its pickup point is scored
    /// * `candidates` - Exactly the drivers that were Available when the
    ///   snapshot was taken. Implementations do not filter by status.
    ///
    /// # Returns
    ///
    /// [`Assignment::Assigned`] with the chosen driver, or
    /// [`Assignment::Unassignable`] when `candidates` is empty.
    fn assign(&self, request: &RideRequest, candidates: &[Driver]) -> Assignment;
}
