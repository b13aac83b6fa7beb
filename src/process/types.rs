/*!
 * Process Types
 * The job record and its priority class
 */

use crate::core::types::{JobId, SlotOffset, Tick, WorkerId};
use crate::resources::{Devices, Requirements, Reservation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Priority value outside the four known classes
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid priority {0}: expected 0 (realtime) or 1-3 (user)")]
pub struct InvalidPriority(pub u32);

/// Priority class, fixed for a job's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Priority {
    Realtime = 0,
    High = 1,
    Normal = 2,
    Low = 3,
}

impl Priority {
    #[inline]
    pub const fn is_realtime(&self) -> bool {
        matches!(self, Priority::Realtime)
    }

    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u32> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Realtime),
            1 => Ok(Priority::High),
            2 => Ok(Priority::Normal),
            3 => Ok(Priority::Low),
            other => Err(InvalidPriority(other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A unit of simulated work
#[derive(Debug, Serialize)]
pub struct Job {
    pub id: JobId,
    /// Tick at which the job becomes eligible
    pub arrival: Tick,
    pub priority: Priority,
    /// Total CPU ticks requested
    pub burst: u32,
    /// CPU ticks still owed; never increases
    pub remaining: u32,
    pub requirements: Requirements,
    /// Worker handle, set when the job first runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reservation: Option<Reservation>,
}

impl Job {
    pub fn new(
        id: JobId,
        arrival: Tick,
        priority: Priority,
        burst: u32,
        requirements: Requirements,
    ) -> Self {
        Self {
            id,
            arrival,
            priority,
            burst,
            remaining: burst,
            requirements,
            worker: None,
            reservation: None,
        }
    }

    /// Shorthand for a job with a memory request and device needs
    pub fn with_devices(
        id: JobId,
        arrival: Tick,
        priority: Priority,
        burst: u32,
        memory: usize,
        devices: Devices,
    ) -> Self {
        Self::new(id, arrival, priority, burst, Requirements::new(memory, devices))
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.worker.is_some()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one tick of CPU time
    pub fn run_tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn reservation(&self) -> Option<&Reservation> {
        self.reservation.as_ref()
    }

    /// Start of the reserved memory run, valid only while a reservation is held
    pub fn memory_offset(&self) -> Option<SlotOffset> {
        self.reservation.as_ref().map(Reservation::offset)
    }

    pub fn attach_reservation(&mut self, reservation: Reservation) {
        debug_assert!(self.reservation.is_none(), "job {} already holds a reservation", self.id);
        self.reservation = Some(reservation);
    }

    pub fn take_reservation(&mut self) -> Option<Reservation> {
        self.reservation.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_number() {
        assert_eq!(Priority::try_from(0), Ok(Priority::Realtime));
        assert_eq!(Priority::try_from(3), Ok(Priority::Low));
        assert_eq!(Priority::try_from(4), Err(InvalidPriority(4)));
    }

    #[test]
    fn test_run_tick_saturates() {
        let mut job = Job::new(0, 0, Priority::High, 0, Requirements::default());
        job.run_tick();
        assert_eq!(job.remaining, 0);
        assert!(job.is_finished());
    }
}
