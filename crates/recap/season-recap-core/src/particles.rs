//! Particle burst played once when an award is revealed.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One falling particle. Immutable after generation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleDescriptor {
    /// Sequence index within the batch; stable render key.
    pub id: u32,
    /// Percentage of the modal width, in `[0, 100)`.
    pub horizontal_position: f64,
    /// Seconds before the particle starts falling, in `[0, max_delay)`.
    pub start_delay: f64,
}

/// Draw a batch of `count` particles from `rng`. Ids are `u32`, so the batch
/// never exceeds `u32::MAX` particles.
pub fn generate_burst<R: Rng>(
    rng: &mut R,
    count: usize,
    max_delay_s: f64,
) -> Vec<ParticleDescriptor> {
    (0..=u32::MAX)
        .take(count)
        .map(|id| ParticleDescriptor {
            id,
            horizontal_position: rng.random_range(0.0..100.0),
            start_delay: if max_delay_s > 0.0 {
                rng.random_range(0.0..max_delay_s)
            } else {
                0.0
            },
        })
        .collect()
}
