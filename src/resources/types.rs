/*!
 * Resource Types
 * Device counts, memory scopes and reservation tokens
 */

use crate::core::types::{Size, SlotOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Resource operation result
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Resource errors
///
/// Both variants describe transient unavailability; permanent infeasibility is
/// answered by `ResourcePool::is_satisfiable` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("No contiguous run of {requested} free slots in {scope} memory")]
    MemoryUnavailable { requested: Size, scope: MemoryScope },

    #[error("Devices unavailable: requested {requested}, available {available}")]
    DevicesUnavailable { requested: Devices, available: Devices },
}

/// Which part of the memory map a request may be placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryScope {
    /// Whole map
    Realtime,
    /// Slots below the user bound only
    User,
}

impl fmt::Display for MemoryScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryScope::Realtime => write!(f, "realtime"),
            MemoryScope::User => write!(f, "user"),
        }
    }
}

/// Quantities of the four discrete device types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Devices {
    pub printers: u32,
    pub scanners: u32,
    pub modems: u32,
    pub drives: u32,
}

impl Devices {
    pub const NONE: Devices = Devices::new(0, 0, 0, 0);

    pub const fn new(printers: u32, scanners: u32, modems: u32, drives: u32) -> Self {
        Self {
            printers,
            scanners,
            modems,
            drives,
        }
    }

    /// True if every component is less than or equal to the matching one in `other`
    #[inline]
    pub fn fits_within(&self, other: &Devices) -> bool {
        self.printers <= other.printers
            && self.scanners <= other.scanners
            && self.modems <= other.modems
            && self.drives <= other.drives
    }

    /// Component-wise subtraction, `None` if any component would go negative
    pub fn checked_sub(&self, other: &Devices) -> Option<Devices> {
        Some(Devices {
            printers: self.printers.checked_sub(other.printers)?,
            scanners: self.scanners.checked_sub(other.scanners)?,
            modems: self.modems.checked_sub(other.modems)?,
            drives: self.drives.checked_sub(other.drives)?,
        })
    }

    /// Component-wise addition, each component capped at `max`
    pub fn saturating_add_capped(&self, other: &Devices, max: &Devices) -> Devices {
        Devices {
            printers: (self.printers + other.printers).min(max.printers),
            scanners: (self.scanners + other.scanners).min(max.scanners),
            modems: (self.modems + other.modems).min(max.modems),
            drives: (self.drives + other.drives).min(max.drives),
        }
    }
}

impl fmt::Display for Devices {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.printers, self.scanners, self.modems, self.drives
        )
    }
}

/// Memory and device demand of one job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub memory: Size,
    pub devices: Devices,
}

impl Requirements {
    pub fn new(memory: Size, devices: Devices) -> Self {
        Self { memory, devices }
    }
}

/// Resources held by an admitted job
///
/// Handed out by `ResourcePool::reserve` and consumed by `ResourcePool::release`,
/// so a reservation cannot be released twice.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Reservation {
    offset: SlotOffset,
    length: Size,
    devices: Devices,
}

impl Reservation {
    pub(super) fn new(offset: SlotOffset, length: Size, devices: Devices) -> Self {
        Self {
            offset,
            length,
            devices,
        }
    }

    /// First slot of the reserved memory run
    pub fn offset(&self) -> SlotOffset {
        self.offset
    }

    pub fn length(&self) -> Size {
        self.length
    }

    pub fn devices(&self) -> Devices {
        self.devices
    }

    /// Slot range covered by this reservation
    pub fn slots(&self) -> std::ops::Range<SlotOffset> {
        self.offset..self.offset + self.length
    }
}
