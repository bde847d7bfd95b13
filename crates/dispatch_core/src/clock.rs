//! Process-wide logical clock. Advanced only by explicit ticks; its value
//! timestamps ride request transitions so a run can be replayed in order.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogicalClock {
    now: u64,
}

impl LogicalClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advance by one and return the new time.
    pub fn tick(&mut self) -> u64 {
        self.now = self.now.saturating_add(1);
        self.now
    }
}
