/*!
 * Device Counters
 * All-or-nothing reservation of printers, scanners, modems and drives
 */

use super::types::{Devices, ResourceError, ResourceResult};
use tracing::{trace, warn};

/// Available counts of each device, bounded by their configured maxima
#[derive(Debug, Clone)]
pub struct DeviceCounters {
    max: Devices,
    available: Devices,
}

impl DeviceCounters {
    pub fn new(max: Devices) -> Self {
        Self {
            max,
            available: max,
        }
    }

    pub fn max(&self) -> Devices {
        self.max
    }

    pub fn available(&self) -> Devices {
        self.available
    }

    /// Non-mutating availability check
    #[inline]
    pub fn check(&self, request: &Devices) -> bool {
        request.fits_within(&self.available)
    }

    /// Decrement all four counters, or none of them
    pub fn reserve(&mut self, request: &Devices) -> ResourceResult<()> {
        let remaining =
            self.available
                .checked_sub(request)
                .ok_or(ResourceError::DevicesUnavailable {
                    requested: *request,
                    available: self.available,
                })?;
        self.available = remaining;
        trace!(requested = %request, available = %self.available, "devices reserved");
        Ok(())
    }

    pub fn release(&mut self, request: &Devices) {
        let restored = self.available.saturating_add_capped(request, &self.max);
        if restored.checked_sub(&self.available) != Some(*request) {
            warn!(released = %request, available = %self.available, "device release exceeds maximum");
        }
        self.available = restored;
        trace!(released = %request, available = %self.available, "devices released");
    }

    /// True if `request` could ever be met, regardless of current usage
    pub fn is_satisfiable(&self, request: &Devices) -> bool {
        request.fits_within(&self.max)
    }
}
