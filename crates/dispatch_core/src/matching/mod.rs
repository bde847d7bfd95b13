pub mod algorithm;
pub mod nearest;
pub mod types;

use serde::{Deserialize, Serialize};

pub use algorithm::MatchingAlgorithm;
pub use nearest::NearestDriverMatching;
pub use types::Assignment;

use crate::config::DispatchConfig;

/// Selectable matching algorithm implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingAlgorithmType {
    /// Linear scan for the closest available driver.
    #[default]
    Nearest,
}

/// Build the algorithm for `kind` using the tunables in `config`.
pub fn build_matching_algorithm(
    kind: MatchingAlgorithmType,
    config: &DispatchConfig,
) -> Box<dyn MatchingAlgorithm> {
    match kind {
        MatchingAlgorithmType::Nearest => {
            Box::new(NearestDriverMatching::new(config.tie_epsilon))
        }
    }
}
