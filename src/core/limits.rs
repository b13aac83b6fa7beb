/*!
 * System Limits and Constants
 *
 * Build-time capacities of the simulated host. None of these are exposed on the
 * command line; `DispatcherConfig::default()` is built from them.
 */

use std::time::Duration;

// =============================================================================
// MEMORY
// =============================================================================

/// Total memory map capacity in slots (1 slot = 1 MB)
pub const TOTAL_MEMORY: usize = 1024;

/// Slots at the top of memory kept for realtime jobs
pub const RESERVED_MEMORY: usize = 64;

/// Upper bound (exclusive) of the region user jobs may allocate from
pub const USER_MEMORY: usize = TOTAL_MEMORY - RESERVED_MEMORY;

// =============================================================================
// DEVICES
// =============================================================================

pub const MAX_PRINTERS: u32 = 2;
pub const MAX_SCANNERS: u32 = 1;
pub const MAX_MODEMS: u32 = 1;
pub const MAX_DRIVES: u32 = 2;

// =============================================================================
// DISPATCHER
// =============================================================================

/// Maximum number of jobs read from a job file; excess lines are ignored
pub const MAX_JOBS: usize = 1000;

/// Wall-clock length of one simulated tick
pub const TICK: Duration = Duration::from_secs(1);

/// Upper bound on waiting for a worker to acknowledge suspend or terminate
pub const ACK_TIMEOUT: Duration = Duration::from_secs(5);
