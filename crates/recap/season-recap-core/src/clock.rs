//! Cancellable timer queue driven by host-supplied time.
//!
//! The core never reads a wall clock. Owners advance a millisecond timeline
//! and pop timers as they become due, so every deferred callback runs inside
//! the owner's own `&mut self` and can never outlive it.

use serde::{Deserialize, Serialize};

use crate::ids::{IdAllocator, TimerId};

/// A scheduled timer. `period` is set for repeating timers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timer<K> {
    pub id: TimerId,
    pub kind: K,
    pub due_ms: f64,
    pub period_ms: Option<f64>,
}

/// A timer that came due, paired with the time it fired at.
///
/// `ticks` is 1 for single-shot timers. A repeating timer that fell several
/// periods behind fires once with the number of periods it covered, and
/// `at_ms` is the last of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub kind: K,
    pub at_ms: f64,
    pub ticks: u64,
}

#[derive(Debug)]
pub struct TimerQueue<K> {
    ids: IdAllocator,
    timers: Vec<Timer<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            ids: IdAllocator::new(),
            timers: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once at `now + delay`.
    pub fn schedule_once(&mut self, now_ms: f64, delay_ms: f64, kind: K) -> TimerId {
        let id = self.ids.alloc_timer();
        self.timers.push(Timer {
            id,
            kind,
            due_ms: now_ms + delay_ms.max(0.0),
            period_ms: None,
        });
        id
    }

    /// Fire at `now + period`, then every `period` after that until cancelled.
    pub fn schedule_repeating(&mut self, now_ms: f64, period_ms: f64, kind: K) -> TimerId {
        let id = self.ids.alloc_timer();
        self.timers.push(Timer {
            id,
            kind,
            due_ms: now_ms + period_ms,
            period_ms: Some(period_ms),
        });
        id
    }

    /// Remove a timer. Returns false when it had already fired or been cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Remove every timer of the given kind, returning how many were dropped.
    pub fn cancel_kind(&mut self, kind: &K) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| &t.kind != kind);
        before - self.timers.len()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Number of outstanding timers of `kind`.
    pub fn pending(&self, kind: &K) -> usize {
        self.timers.iter().filter(|t| &t.kind == kind).count()
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer<K>> {
        self.timers.iter().find(|t| t.id == id)
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// Ties resolve in scheduling order. Repeating timers stay queued and are
    /// re-armed at the first period boundary after `until_ms`, so each one
    /// pops at most once per horizon. A non-finite horizon pops nothing.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Fired<K>> {
        if !until_ms.is_finite() {
            return None;
        }
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[idx];
        match timer.period_ms {
            Some(period) => {
                let first = timer.due_ms;
                let mut ticks = ((until_ms - first) / period).floor() as u64 + 1;
                let mut next = first + ticks as f64 * period;
                if next <= until_ms {
                    ticks += 1;
                    next += period;
                }
                timer.due_ms = next;
                Some(Fired {
                    id: timer.id,
                    kind: timer.kind.clone(),
                    at_ms: next - period,
                    ticks,
                })
            }
            None => {
                let timer = self.timers.remove(idx);
                Some(Fired {
                    id: timer.id,
                    kind: timer.kind,
                    at_ms: timer.due_ms,
                    ticks: 1,
                })
            }
        }
    }
}
