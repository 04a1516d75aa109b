//! Output contracts: read-only view models for the presentation layer.
//!
//! A `PageFrame` is rebuilt on every `RecapPage::update()`. Adapters bind its
//! values to visual output and transport `events`.

use serde::{Deserialize, Serialize};

use crate::award::{AwardBody, AwardEntry, ImageFit, PresentationKind};
use crate::ids::CounterId;
use crate::particles::ParticleDescriptor;
use crate::reveal::{RevealEvent, RevealPhase, RevealState};
use crate::visibility::SectionKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterGroup {
    SeasonReport,
    /// Mounted inside the modal while an attendance award is revealed.
    AttendanceStats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterView {
    pub id: CounterId,
    pub group: CounterGroup,
    pub label: String,
    pub value: f64,
    /// Value and suffix as displayed, e.g. `3120km`.
    pub text: String,
    pub settled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AwardView {
    pub tag: String,
    pub winner_name: String,
    pub short_description: String,
    pub presentation: PresentationKind,
    pub body: AwardBody,
    pub image_fit: ImageFit,
    pub gallery: Vec<String>,
}

impl From<&AwardEntry> for AwardView {
    fn from(award: &AwardEntry) -> Self {
        Self {
            tag: award.tag.clone(),
            winner_name: award.winner_name.clone(),
            short_description: award.short_description.clone(),
            presentation: award.presentation(),
            body: award.body(),
            image_fit: award.image_fit(),
            gallery: award.gallery.clone(),
        }
    }
}

/// Modal state. `award` outlives `phase == Closed` by the grace delay so the
/// exit transition can still render it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalView {
    pub phase: RevealPhase,
    pub award: Option<AwardView>,
    pub carousel_index: Option<usize>,
    pub particles: Vec<ParticleDescriptor>,
}

impl From<&RevealState> for ModalView {
    fn from(state: &RevealState) -> Self {
        Self {
            phase: state.phase,
            award: state.active_award.as_deref().map(AwardView::from),
            carousel_index: state.carousel_index(),
            particles: state.particles.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
    pub section: SectionKind,
    pub revealed: bool,
}

/// Static teaser card in the awards grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardCardView {
    pub index: usize,
    pub tag: String,
}

/// Discrete signals emitted during a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RecapEvent {
    Reveal { event: RevealEvent },
    CounterSettled { id: CounterId },
    /// A command was dropped by a guard.
    Ignored { reason: String },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageFrame {
    pub now_ms: f64,
    #[serde(default)]
    pub counters: Vec<CounterView>,
    #[serde(default)]
    pub modal: ModalView,
    #[serde(default)]
    pub sections: Vec<SectionView>,
    #[serde(default)]
    pub events: Vec<RecapEvent>,
}

impl PageFrame {
    #[inline]
    pub fn clear(&mut self) {
        self.counters.clear();
        self.sections.clear();
        self.events.clear();
        self.modal = ModalView::default();
    }

    #[inline]
    pub fn push_event(&mut self, event: RecapEvent) {
        self.events.push(event);
    }

    pub fn counter(&self, id: CounterId) -> Option<&CounterView> {
        self.counters.iter().find(|c| c.id == id)
    }
}
