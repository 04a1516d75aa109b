//! Numeric roll-up counter.
//!
//! Shows `0` until its element is first visible, then ticks up to `end` over
//! `duration` seconds in value-dependent steps and snaps to exactly `end`.
//! The visibility trigger is a once latch, so the animation never replays.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::ids::CounterId;
use crate::visibility::VisibilityLatch;

/// Target, unit suffix and optional duration for one counter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub end: f64,
    #[serde(default)]
    pub suffix: String,
    /// Seconds; falls back to `Config::counter_duration_s` when absent.
    #[serde(default)]
    pub duration_s: Option<f64>,
}

impl CounterSpec {
    pub fn new(end: f64, suffix: impl Into<String>) -> Self {
        Self {
            end,
            suffix: suffix.into(),
            duration_s: None,
        }
    }

    pub fn with_duration(mut self, duration_s: f64) -> Self {
        self.duration_s = Some(duration_s);
        self
    }
}

/// Quantization step, chosen by the magnitude of the target.
#[inline]
pub fn step_for(end: f64) -> f64 {
    if end > 1000.0 {
        50.0
    } else if end > 200.0 {
        5.0
    } else if end > 50.0 {
        2.0
    } else {
        1.0
    }
}

/// Stepped in-progress value: the step comes from `end`, the floor from `raw`.
/// Fractional targets only show their fraction on the final snap.
#[inline]
pub fn quantize(raw: f64, end: f64) -> f64 {
    let step = step_for(end);
    ((raw / step).floor() * step).min(end)
}

/// Where the counter's frame loop is.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FramePhase {
    /// Not yet visible.
    Idle,
    /// Visible; the first frame will record the start time.
    Scheduled,
    Running { start_ms: f64 },
    Settled,
    /// Torn down before settling; no frame will run again.
    Cancelled,
}

/// Result of driving one animation frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameResult {
    /// No frame was pending.
    NotScheduled,
    Running,
    /// This frame reached the target.
    Settled,
}

#[derive(Clone, Debug)]
pub struct NumericRollupCounter {
    id: CounterId,
    end: f64,
    suffix: String,
    duration_s: f64,
    latch: VisibilityLatch,
    displayed: f64,
    phase: FramePhase,
}

impl NumericRollupCounter {
    pub fn new(id: CounterId, spec: &CounterSpec, default_duration_s: f64) -> Self {
        Self {
            id,
            end: spec.end,
            suffix: spec.suffix.clone(),
            duration_s: spec.duration_s.unwrap_or(default_duration_s),
            latch: VisibilityLatch::new(),
            displayed: 0.0,
            phase: FramePhase::Idle,
        }
    }

    /// Report an intersection change. Starts the animation on the first
    /// positive report; returns whether this call started it.
    pub fn observe_visibility(&mut self, visible: bool) -> bool {
        if !self.latch.observe(visible) {
            return false;
        }
        if self.phase != FramePhase::Idle {
            return false;
        }
        trace!("counter {:?}: visible, scheduling first frame", self.id);
        self.phase = FramePhase::Scheduled;
        true
    }

    /// Run one frame at `now_ms`. The first frame after visibility fixes the
    /// start time, so it always shows progress 0 unless the counter settles.
    pub fn frame(&mut self, now_ms: f64) -> FrameResult {
        let start_ms = match self.phase {
            FramePhase::Scheduled => {
                self.phase = FramePhase::Running { start_ms: now_ms };
                now_ms
            }
            FramePhase::Running { start_ms } => start_ms,
            FramePhase::Idle | FramePhase::Settled | FramePhase::Cancelled => {
                return FrameResult::NotScheduled;
            }
        };

        if self.end == 0.0 || self.duration_s <= 0.0 {
            return self.settle();
        }

        let progress = ((now_ms - start_ms) / (self.duration_s * 1000.0)).clamp(0.0, 1.0);
        self.displayed = quantize(progress * self.end, self.end);
        trace!(
            "counter {:?}: progress={progress:.3} displayed={}",
            self.id,
            self.displayed
        );

        if progress >= 1.0 {
            self.settle()
        } else {
            FrameResult::Running
        }
    }

    fn settle(&mut self) -> FrameResult {
        self.displayed = self.end;
        self.phase = FramePhase::Settled;
        FrameResult::Settled
    }

    /// Cancel any pending frame. Returns true if one was pending.
    pub fn teardown(&mut self) -> bool {
        match self.phase {
            FramePhase::Scheduled | FramePhase::Running { .. } => {
                trace!("counter {:?}: torn down mid-animation", self.id);
                self.phase = FramePhase::Cancelled;
                true
            }
            FramePhase::Idle => {
                self.phase = FramePhase::Cancelled;
                false
            }
            FramePhase::Settled | FramePhase::Cancelled => false,
        }
    }

    pub fn id(&self) -> CounterId {
        self.id
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn is_settled(&self) -> bool {
        self.phase == FramePhase::Settled
    }

    pub fn has_been_visible(&self) -> bool {
        self.latch.has_been_visible()
    }

    /// Displayed value followed by the suffix, e.g. `3120km` or `56.3%`.
    pub fn label(&self) -> String {
        format!("{}{}", self.displayed, self.suffix)
    }
}
