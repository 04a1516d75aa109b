//! Season Recap Core (engine-agnostic)
//!
//! The two interactive pieces of the season recap page, with no rendering:
//! roll-up counters that tick from zero to a target once visible, and the
//! award reveal sequencer (suspense phase, timed reveal, particle burst,
//! gallery carousel). Hosts drive everything through `RecapPage::update()`
//! with a frame delta and read back a serializable `PageFrame`.

pub mod award;
pub mod carousel;
pub mod clock;
pub mod config;
pub mod counter;
pub mod dataset;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod outputs;
pub mod page;
pub mod particles;
pub mod reveal;
pub mod visibility;

// Re-exports for consumers (adapters)
pub use award::{AwardBody, AwardEntry, ImageFit, PresentationKind, RankingLine, StatSpec};
pub use carousel::Carousel;
pub use clock::TimerQueue;
pub use config::Config;
pub use counter::{CounterSpec, FramePhase, FrameResult, NumericRollupCounter};
pub use dataset::SeasonDataset;
pub use error::{RecapError, RecapResult};
pub use ids::{CounterId, TimerId};
pub use inputs::{Inputs, PageCommand};
pub use outputs::{
    AwardCardView, AwardView, CounterGroup, CounterView, ModalView, PageFrame, RecapEvent,
    SectionView,
};
pub use page::RecapPage;
pub use particles::{generate_burst, ParticleDescriptor};
pub use reveal::{RevealEvent, RevealPhase, RevealSequencer, RevealState, RevealTimer};
pub use visibility::{SectionKind, VisibilityLatch, VisibilityTarget};
