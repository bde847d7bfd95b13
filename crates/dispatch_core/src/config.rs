/// Default distance tolerance under which two candidates count as equidistant.
pub const DEFAULT_TIE_EPSILON: f64 = 1e-9;

/// Tunables for the dispatcher and its matching algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchConfig {
    /// Candidates whose distances differ by at most this much are tied and
    /// resolved by smallest driver id.
    pub tie_epsilon: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tie_epsilon: DEFAULT_TIE_EPSILON,
        }
    }
}

impl DispatchConfig {
    pub fn with_tie_epsilon(mut self, tie_epsilon: f64) -> Self {
        self.tie_epsilon = tie_epsilon.abs();
        self
    }
}
