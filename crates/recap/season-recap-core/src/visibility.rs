//! "Once" visibility latches.
//!
//! Hosts report intersection changes for counters and page sections; the
//! latch remembers the first positive report and ignores everything after.

use serde::{Deserialize, Serialize};

use crate::ids::CounterId;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityLatch {
    seen: bool,
}

impl VisibilityLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one observation. Returns true only on the first false→true edge.
    #[inline]
    pub fn observe(&mut self, visible: bool) -> bool {
        if self.seen || !visible {
            return false;
        }
        self.seen = true;
        true
    }

    #[inline]
    pub fn has_been_visible(&self) -> bool {
        self.seen
    }
}

/// Page sections that play a scroll-reveal entrance once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    SeasonReport,
    MatchStats,
    Roster,
    HallOfFame,
    Awards,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::SeasonReport,
        SectionKind::MatchStats,
        SectionKind::Roster,
        SectionKind::HallOfFame,
        SectionKind::Awards,
        SectionKind::Footer,
    ];
}

/// What a host visibility report refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisibilityTarget {
    Counter { id: CounterId },
    Section { section: SectionKind },
}
