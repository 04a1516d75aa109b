//! Award reveal sequencer.
//!
//! Closed → Wrapped (open) → Revealed (after `reveal_delay_ms`) → Closed
//! (close, with `active_award` kept for `close_grace_ms`). All deferred work
//! lives in the sequencer's own timer queue and only runs from `advance`, so
//! cancelling a timer or disposing the sequencer is immediate and final.

use std::sync::Arc;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::award::AwardEntry;
use crate::carousel::Carousel;
use crate::clock::TimerQueue;
use crate::config::Config;
use crate::particles::{generate_burst, ParticleDescriptor};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    #[default]
    Closed,
    Wrapped,
    Revealed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealTimer {
    Reveal,
    Carousel,
    ClearActive,
}

/// Transient state of one modal session.
#[derive(Clone, Debug, Default)]
pub struct RevealState {
    pub phase: RevealPhase,
    /// Shared with the dataset; never mutated here.
    pub active_award: Option<Arc<AwardEntry>>,
    pub carousel: Carousel,
    /// Populated only on the transition into Revealed.
    pub particles: Vec<ParticleDescriptor>,
}

impl RevealState {
    /// Current image, meaningful only while revealed with a non-empty gallery.
    pub fn carousel_index(&self) -> Option<usize> {
        if self.phase == RevealPhase::Revealed && !self.carousel.is_empty() {
            Some(self.carousel.index())
        } else {
            None
        }
    }
}

/// Transitions observed since the last drain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    Opened {
        tag: String,
        at_ms: f64,
    },
    Revealed {
        tag: String,
        at_ms: f64,
        particles: usize,
        carousel: bool,
    },
    CarouselAdvanced {
        tag: String,
        at_ms: f64,
        index: usize,
        /// Periods covered by this advance; above 1 after a long step.
        steps: u64,
    },
    Closed {
        tag: String,
        at_ms: f64,
    },
    Cleared {
        at_ms: f64,
    },
}

#[derive(Debug)]
pub struct RevealSequencer<R = StdRng> {
    cfg: Config,
    rng: R,
    timers: TimerQueue<RevealTimer>,
    state: RevealState,
    now_ms: f64,
    disposed: bool,
    events: Vec<RevealEvent>,
}

impl<R: Rng> RevealSequencer<R> {
    pub fn new(cfg: &Config, rng: R) -> Self {
        Self {
            cfg: cfg.clone(),
            rng,
            timers: TimerQueue::new(),
            state: RevealState::default(),
            now_ms: 0.0,
            disposed: false,
            events: Vec::new(),
        }
    }

    /// Start a session for `award`. Supersedes any running session and any
    /// pending close grace. `None` is ignored.
    pub fn open(&mut self, award: Option<Arc<AwardEntry>>) -> RevealPhase {
        if self.disposed {
            warn!("open ignored: sequencer disposed");
            return self.state.phase;
        }
        let Some(award) = award else {
            debug!("open ignored: no award");
            return self.state.phase;
        };

        self.timers.clear();
        debug!("reveal: open '{}' (wrapped)", award.tag);
        self.events.push(RevealEvent::Opened {
            tag: award.tag.clone(),
            at_ms: self.now_ms,
        });
        self.state = RevealState {
            phase: RevealPhase::Wrapped,
            carousel: Carousel::new(award.gallery.len()),
            active_award: Some(award),
            particles: Vec::new(),
        };
        self.timers
            .schedule_once(self.now_ms, self.cfg.reveal_delay_ms, RevealTimer::Reveal);
        self.state.phase
    }

    /// Show the winner now. Only valid from Wrapped; otherwise a no-op.
    pub fn reveal_now(&mut self) -> RevealPhase {
        if self.disposed || self.state.phase != RevealPhase::Wrapped {
            return self.state.phase;
        }
        let Some(award) = self.state.active_award.clone() else {
            return self.state.phase;
        };

        // A manual reveal must not leave the delayed one behind.
        self.timers.cancel_kind(&RevealTimer::Reveal);

        self.state.phase = RevealPhase::Revealed;
        self.state.particles = generate_burst(
            &mut self.rng,
            self.cfg.particle_count,
            self.cfg.particle_max_delay_s,
        );
        let carousel = self.state.carousel.is_cycling();
        if carousel {
            self.timers.schedule_repeating(
                self.now_ms,
                self.cfg.carousel_period_ms,
                RevealTimer::Carousel,
            );
        }
        debug!(
            "reveal: '{}' revealed ({} particles, carousel={carousel})",
            award.tag,
            self.state.particles.len()
        );
        self.events.push(RevealEvent::Revealed {
            tag: award.tag.clone(),
            at_ms: self.now_ms,
            particles: self.state.particles.len(),
            carousel,
        });
        self.state.phase
    }

    /// Rotate the gallery by one. No-op unless revealed with images.
    pub fn advance_carousel(&mut self) -> Option<usize> {
        self.advance_carousel_by(1)
    }

    fn advance_carousel_by(&mut self, steps: u64) -> Option<usize> {
        if self.disposed || self.state.phase != RevealPhase::Revealed {
            return None;
        }
        let tag = self.state.active_award.as_ref()?.tag.clone();
        let index = self.state.carousel.advance_by(steps)?;
        trace!("reveal: '{tag}' carousel -> {index} (+{steps})");
        self.events.push(RevealEvent::CarouselAdvanced {
            tag,
            at_ms: self.now_ms,
            index,
            steps,
        });
        Some(index)
    }

    /// Hide the modal. `active_award` stays readable for the grace delay.
    pub fn close(&mut self) -> RevealPhase {
        if self.disposed || self.state.phase == RevealPhase::Closed {
            return self.state.phase;
        }
        self.timers.cancel_kind(&RevealTimer::Reveal);
        self.timers.cancel_kind(&RevealTimer::Carousel);

        self.state.phase = RevealPhase::Closed;
        self.state.particles.clear();
        let tag = self
            .state
            .active_award
            .as_ref()
            .map(|a| a.tag.clone())
            .unwrap_or_default();
        debug!("reveal: close '{tag}'");
        self.events.push(RevealEvent::Closed {
            tag,
            at_ms: self.now_ms,
        });
        self.timers.schedule_once(
            self.now_ms,
            self.cfg.close_grace_ms,
            RevealTimer::ClearActive,
        );
        self.state.phase
    }

    fn clear_active(&mut self) {
        if self.state.phase != RevealPhase::Closed {
            return;
        }
        self.state.active_award = None;
        self.state.carousel = Carousel::default();
        trace!("reveal: active award cleared");
        self.events.push(RevealEvent::Cleared { at_ms: self.now_ms });
    }

    /// Move time forward by `dt_ms`, firing every due timer in order.
    /// Timers armed by a callback fire within the same call if they fall due;
    /// carousel ticks that fell behind are applied as one advance.
    /// A non-finite `dt_ms` leaves time where it is.
    pub fn advance(&mut self, dt_ms: f64) -> RevealPhase {
        if self.disposed {
            return self.state.phase;
        }
        if !dt_ms.is_finite() {
            warn!("reveal: ignoring non-finite step {dt_ms}");
            return self.state.phase;
        }
        let target = self.now_ms + dt_ms.max(0.0);
        while let Some(fired) = self.timers.pop_due(target) {
            self.now_ms = fired.at_ms;
            trace!("reveal: timer {:?} fired at {}", fired.kind, fired.at_ms);
            match fired.kind {
                RevealTimer::Reveal => {
                    self.reveal_now();
                }
                RevealTimer::Carousel => {
                    self.advance_carousel_by(fired.ticks);
                }
                RevealTimer::ClearActive => self.clear_active(),
            }
        }
        self.now_ms = target;
        self.state.phase
    }

    /// Cancel everything and refuse further work.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let dropped = self.timers.len();
        self.timers.clear();
        self.state = RevealState::default();
        self.disposed = true;
        debug!("reveal: disposed ({dropped} timers cancelled)");
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn phase(&self) -> RevealPhase {
        self.state.phase
    }

    pub fn active_award(&self) -> Option<&Arc<AwardEntry>> {
        self.state.active_award.as_ref()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Outstanding timers of `kind`.
    pub fn pending(&self, kind: RevealTimer) -> usize {
        self.timers.pending(&kind)
    }

    pub fn drain_events(&mut self) -> Vec<RevealEvent> {
        std::mem::take(&mut self.events)
    }
}
