use crate::config::DEFAULT_TIE_EPSILON;
use crate::model::{Driver, Point, RideRequest};

use super::algorithm::MatchingAlgorithm;
use super::types::Assignment;

/// Nearest-driver matching: the candidate closest to the pickup point wins.
///
/// # Algorithm Behavior
///
/// 1. Computes the Euclidean distance from every candidate to `request.pickup`
/// 2. Finds the minimum distance over all candidates
/// 3. Among candidates within `tie_epsilon` of that minimum, the
///    lexicographically smallest driver id wins
///
/// Distances that overflow or are NaN rank last, so a non-empty candidate set
/// always yields a driver.
///
/// # Performance
///
/// Time complexity: O(n) in the number of candidates. No spatial index.
#[derive(Debug, Clone, Copy)]
pub struct NearestDriverMatching {
    tie_epsilon: f64,
}

impl NearestDriverMatching {
    pub fn new(tie_epsilon: f64) -> Self {
        Self {
            tie_epsilon: tie_epsilon.abs(),
        }
    }
}

impl Default for NearestDriverMatching {
    fn default() -> Self {
        Self::new(DEFAULT_TIE_EPSILON)
    }
}

/// Distance used for ranking; NaN is pushed to the back with the overflows.
fn ranking_distance(driver: &Driver, pickup: Point) -> f64 {
    let distance = driver.position.distance_to(pickup);
    if distance.is_nan() {
        f64::INFINITY
    } else {
        distance
    }
}

impl MatchingAlgorithm for NearestDriverMatching {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn assign(&self, request: &RideRequest, candidates: &[Driver]) -> Assignment {
        let scored: Vec<(&Driver, f64)> = candidates
            .iter()
            .map(|driver| (driver, ranking_distance(driver, request.pickup)))
            .collect();

        let Some(min_distance) = scored
            .iter()
            .map(|(_, distance)| *distance)
            .min_by(f64::total_cmp)
        else {
            return Assignment::Unassignable;
        };

        // The tie band is anchored at the true minimum, so ties never chain.
        let tie_limit = min_distance + self.tie_epsilon;
        let winner = scored
            .into_iter()
            .filter(|(_, distance)| *distance <= tie_limit)
            .min_by(|(a, _), (b, _)| a.id.cmp(&b.id));

        match winner {
            Some((driver, distance)) => Assignment::Assigned {
                driver_id: driver.id.clone(),
                distance,
            },
            None => Assignment::Unassignable,
        }
    }
}
