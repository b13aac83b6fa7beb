/*!
 * Resource Pool
 * Memory map and device counters for one simulation run
 */

use super::devices::DeviceCounters;
use super::memory::MemoryMap;
use super::types::{
    Devices, MemoryScope, Requirements, Reservation, ResourceResult,
};
use crate::core::config::DispatcherConfig;
use crate::core::types::{Size, SlotOffset};
use tracing::info;

/// Memory and device state shared by admission (reserve) and dispatch (release)
#[derive(Debug, Clone)]
pub struct ResourcePool {
    memory: MemoryMap,
    devices: DeviceCounters,
}

impl ResourcePool {
    pub fn new(total_memory: usize, user_memory: usize, devices: Devices) -> Self {
        info!(
            total_memory,
            user_memory,
            devices = %devices,
            "Resource pool initialized"
        );
        Self {
            memory: MemoryMap::new(total_memory, user_memory),
            devices: DeviceCounters::new(devices),
        }
    }

    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self::new(config.total_memory, config.user_memory, config.devices)
    }

    pub fn memory(&self) -> &MemoryMap {
        &self.memory
    }

    pub fn devices(&self) -> &DeviceCounters {
        &self.devices
    }

    pub fn check_memory(&self, request: Size, scope: MemoryScope) -> ResourceResult<SlotOffset> {
        self.memory.check(request, scope)
    }

    pub fn reserve_memory(&mut self, request: Size, scope: MemoryScope) -> ResourceResult<SlotOffset> {
        self.memory.reserve(request, scope)
    }

    pub fn release_memory(&mut self, offset: SlotOffset, length: Size) {
        self.memory.release(offset, length)
    }

    pub fn check_devices(&self, request: &Devices) -> bool {
        self.devices.check(request)
    }

    pub fn reserve_devices(&mut self, request: &Devices) -> ResourceResult<()> {
        self.devices.reserve(request)
    }

    pub fn release_devices(&mut self, request: &Devices) {
        self.devices.release(request)
    }

    /// True if the demand fits the system maxima for `scope`, whatever is in use now
    pub fn is_satisfiable(&self, request: &Requirements, scope: MemoryScope) -> bool {
        request.memory <= self.memory.limit(scope) && self.devices.is_satisfiable(&request.devices)
    }

    /// True if both memory and devices are available right now
    pub fn check(&self, request: &Requirements, scope: MemoryScope) -> bool {
        self.check_devices(&request.devices) && self.check_memory(request.memory, scope).is_ok()
    }

    /// Reserve devices and memory together; on failure nothing is held
    pub fn reserve(&mut self, request: &Requirements, scope: MemoryScope) -> ResourceResult<Reservation> {
        self.check_memory(request.memory, scope)?;
        self.reserve_devices(&request.devices)?;
        match self.reserve_memory(request.memory, scope) {
            Ok(offset) => Ok(Reservation::new(offset, request.memory, request.devices)),
            Err(e) => {
                self.release_devices(&request.devices);
                Err(e)
            }
        }
    }

    /// Return a reservation's memory and devices to the pool
    pub fn release(&mut self, reservation: Reservation) {
        self.release_memory(reservation.offset(), reservation.length());
        self.release_devices(&reservation.devices());
    }

    /// Log the current availability (trace level)
    pub fn report(&self) {
        tracing::trace!(
            occupied = self.memory.occupied(),
            capacity = self.memory.capacity(),
            available = %self.devices.available(),
            "resource report"
        );
    }
}

