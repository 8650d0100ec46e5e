/**
 * @file clock.rs
 * @date 14/10/2026
 * @brief Cycle counter of the management core
 */
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Clock {
    pub frequency: u64,
    ticks: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(crate::common::CORE_FREQUENCY)
    }
}

impl Clock {
    pub fn new(frequency: u64) -> Self {
        Self {
            frequency,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated wall time after `ticks` cycles.
    pub fn duration_of(&self, ticks: u64) -> Duration {
        let nanos = ticks as u128 * 1_000_000_000 / self.frequency as u128;
        Duration::from_nanos(nanos as u64)
    }

    pub fn elapsed(&self) -> Duration {
        self.duration_of(self.ticks)
    }
}
