/*!
 * Resources Module
 * Memory map and discrete device accounting
 */

pub mod devices;
pub mod memory;
pub mod pool;
pub mod types;

// Re-export for convenience
pub use devices::DeviceCounters;
pub use memory::MemoryMap;
pub use pool::ResourcePool;
pub use types::{
    Devices, MemoryScope, Requirements, Reservation, ResourceError, ResourceResult,
};
