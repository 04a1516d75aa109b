//! Core configuration for season-recap-core.

use serde::{Deserialize, Serialize};

use crate::error::{RecapError, RecapResult};

/// Timings and sizes for the reveal sequencer and counters.
/// Every field has a default, so hosts may pass a partial object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Suspense ("wrapped") phase length before the winner is shown.
    pub reveal_delay_ms: f64,
    /// Period of the gallery carousel while revealed.
    pub carousel_period_ms: f64,
    /// Time `active_award` survives a close so the exit transition can render it.
    pub close_grace_ms: f64,
    /// Particles generated per reveal.
    pub particle_count: usize,
    /// Upper bound (exclusive) of a particle's start delay, in seconds.
    pub particle_max_delay_s: f64,
    /// Roll-up duration for counters that do not carry their own.
    pub counter_duration_s: f64,
    /// Seed for the particle generator.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 1500.0,
            carousel_period_ms: 1500.0,
            close_grace_ms: 300.0,
            particle_count: 50,
            particle_max_delay_s: 0.5,
            counter_duration_s: 2.0,
            seed: 0,
        }
    }
}

impl Config {
    /// Reject timings that would stall or reorder the timer queue.
    pub fn validate(&self) -> RecapResult<()> {
        let timings = [
            ("reveal_delay_ms", self.reveal_delay_ms),
            ("close_grace_ms", self.close_grace_ms),
            ("particle_max_delay_s", self.particle_max_delay_s),
            ("counter_duration_s", self.counter_duration_s),
        ];
        for (field, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(RecapError::InvalidConfig {
                    field: field.to_string(),
                    value,
                });
            }
        }
        if u32::try_from(self.particle_count).is_err() {
            return Err(RecapError::InvalidConfig {
                field: "particle_count".to_string(),
                value: self.particle_count as f64,
            });
        }
        // A zero period would re-arm the carousel at the same instant forever.
        if !self.carousel_period_ms.is_finite() || self.carousel_period_ms <= 0.0 {
            return Err(RecapError::InvalidConfig {
                field: "carousel_period_ms".to_string(),
                value: self.carousel_period_ms,
            });
        }
        Ok(())
    }
}
