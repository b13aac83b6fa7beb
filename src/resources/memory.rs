/*!
 * Memory Map
 * Slot-granular bitmap with first-fit contiguous allocation
 */

use super::types::{MemoryScope, ResourceError, ResourceResult};
use crate::core::types::{Size, SlotOffset};
use tracing::{trace, warn};

/// Fixed-capacity bitmap of memory slots
///
/// Slots `[0, user_bound)` are open to user jobs; realtime requests may use the
/// whole map. State only changes on a confirmed allocation or an explicit
/// release.
#[derive(Debug, Clone)]
pub struct MemoryMap {
    slots: Vec<bool>,
    user_bound: usize,
    occupied: usize,
}

impl MemoryMap {
    pub fn new(capacity: usize, user_bound: usize) -> Self {
        Self {
            slots: vec![false; capacity],
            user_bound: user_bound.min(capacity),
            occupied: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn user_bound(&self) -> usize {
        self.user_bound
    }

    /// Number of slots currently marked occupied
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn is_occupied(&self, slot: SlotOffset) -> bool {
        self.slots.get(slot).copied().unwrap_or(false)
    }

    /// Exclusive upper slot for a scope
    pub fn limit(&self, scope: MemoryScope) -> usize {
        match scope {
            MemoryScope::Realtime => self.slots.len(),
            MemoryScope::User => self.user_bound,
        }
    }

    /// First-fit search without mutation
    pub fn check(&self, request: Size, scope: MemoryScope) -> ResourceResult<SlotOffset> {
        self.first_fit(request, self.limit(scope))
            .ok_or(ResourceError::MemoryUnavailable {
                requested: request,
                scope,
            })
    }

    /// First-fit search, marking the run occupied on success
    pub fn reserve(&mut self, request: Size, scope: MemoryScope) -> ResourceResult<SlotOffset> {
        let offset = self.check(request, scope)?;
        self.slots[offset..offset + request]
            .iter_mut()
            .for_each(|slot| *slot = true);
        self.occupied += request;
        trace!(offset, length = request, %scope, "memory reserved");
        Ok(offset)
    }

    /// Clear `length` slots starting at `offset`
    pub fn release(&mut self, offset: SlotOffset, length: Size) {
        let end = (offset + length).min(self.slots.len());
        if end < offset + length {
            warn!(offset, length, "release extends past end of memory map");
        }

        for slot in self.slots.iter_mut().take(end).skip(offset) {
            if *slot {
                *slot = false;
                self.occupied -= 1;
            }
        }
        trace!(offset, length, "memory released");
    }

    /// Offset of the first run of `request` free slots ending at or before `limit`
    fn first_fit(&self, request: Size, limit: usize) -> Option<SlotOffset> {
        if request == 0 {
            return Some(0);
        }
        let limit = limit.min(self.slots.len());
        if request > limit {
            return None;
        }

        let mut run_start = 0;
        let mut run_len = 0;
        for (slot, &taken) in self.slots[..limit].iter().enumerate() {
            if taken {
                run_len = 0;
                run_start = slot + 1;
                continue;
            }
            run_len += 1;
            if run_len == request {
                return Some(run_start);
            }
        }
        None
    }
}
