/*!
 * Dispatcher Configuration
 * Capacities and timing consumed by the simulation
 */

use super::limits;
use crate::resources::Devices;
use std::time::Duration;

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Total memory slots
    pub total_memory: usize,
    /// Slots available to user jobs, counted from offset 0
    pub user_memory: usize,
    /// Device maxima
    pub devices: Devices,
    /// Job-file truncation cap
    pub max_jobs: usize,
    /// Wall-clock duration of one tick; zero disables sleeping
    pub tick: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            total_memory: limits::TOTAL_MEMORY,
            user_memory: limits::USER_MEMORY,
            devices: Devices::new(
                limits::MAX_PRINTERS,
                limits::MAX_SCANNERS,
                limits::MAX_MODEMS,
                limits::MAX_DRIVES,
            ),
            max_jobs: limits::MAX_JOBS,
            tick: limits::TICK,
        }
    }
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set total and user-accessible memory. The user region is clamped to the total.
    pub fn with_memory(mut self, total: usize, user: usize) -> Self {
        self.total_memory = total;
        self.user_memory = user.min(total);
        self
    }

    pub fn with_devices(mut self, devices: Devices) -> Self {
        self.devices = devices;
        self
    }

    pub fn with_max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = max_jobs;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}
