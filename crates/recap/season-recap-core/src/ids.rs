//! Identifiers and simple allocators for timers and counters.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CounterId(pub u32);

/// Monotonic allocator for TimerId and CounterId.
/// Timer ids double as the tie-breaker for timers due at the same instant.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_timer: u32,
    next_counter: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_counter(&mut self) -> CounterId {
        let id = CounterId(self.next_counter);
        self.next_counter = self.next_counter.wrapping_add(1);
        id
    }
}
