/*!
 * Core Types
 * Common types used across the dispatcher
 */

/// Job identifier, assigned in job-file order
pub type JobId = u32;

/// Simulated clock value (one tick = one simulated second)
pub type Tick = u64;

/// Slot index into the memory map
pub type SlotOffset = usize;

/// Memory request size in slots
pub type Size = usize;

/// Handle of a started worker (OS pid for process workers)
pub type WorkerId = u32;
