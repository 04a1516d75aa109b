//! Award entries and their presentation dispatch.
//!
//! Two awards render differently from the rest. Which ones is decided once,
//! when an entry is built from its tag, and carried as `PresentationKind`.

use serde::{Deserialize, Serialize};

use crate::counter::CounterSpec;

pub const ATTENDANCE_KING_TAG: &str = "ATTENDANCE KING";
pub const RECRUITMENT_AWARD_TAG: &str = "RECRUITMENT AWARD";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationKind {
    /// `long_detail` text, cover-fit gallery.
    Standard,
    /// Fixed statistic roll-ups and ranking block instead of the detail text.
    AttendanceStats,
    /// `long_detail` text, contain-fit gallery.
    RecruitmentGallery,
}

impl PresentationKind {
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            ATTENDANCE_KING_TAG => PresentationKind::AttendanceStats,
            RECRUITMENT_AWARD_TAG => PresentationKind::RecruitmentGallery,
            _ => PresentationKind::Standard,
        }
    }

    pub fn image_fit(self) -> ImageFit {
        match self {
            PresentationKind::RecruitmentGallery => ImageFit::Contain,
            PresentationKind::Standard | PresentationKind::AttendanceStats => ImageFit::Cover,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    Cover,
    Contain,
}

/// A labelled statistic rendered as a roll-up counter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatSpec {
    pub label: String,
    #[serde(flatten)]
    pub counter: CounterSpec,
}

impl StatSpec {
    pub fn new(label: impl Into<String>, end: f64, suffix: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            counter: CounterSpec::new(end, suffix),
        }
    }

    pub fn with_duration(mut self, duration_s: f64) -> Self {
        self.counter = self.counter.with_duration(duration_s);
        self
    }
}

/// One line of the attendance ranking block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingLine {
    pub place: String,
    pub names: Vec<String>,
    pub rate: String,
}

/// The three fixed statistics shown for the attendance award.
pub fn attendance_stats() -> Vec<StatSpec> {
    vec![
        StatSpec::new("출석률", 100.0, "%").with_duration(2.0),
        StatSpec::new("총 이동거리", 3120.0, "km").with_duration(2.0),
        StatSpec::new("이동시간", 48.0, "시간").with_duration(2.0),
    ]
}

/// The fixed ranking block shown below the attendance statistics.
pub fn attendance_rankings() -> Vec<RankingLine> {
    vec![
        RankingLine {
            place: "공동 2등".into(),
            names: vec!["이진우".into(), "정세진".into()],
            rate: "88%".into(),
        },
        RankingLine {
            place: "4등".into(),
            names: vec!["이대열".into()],
            rate: "67%".into(),
        },
    ]
}

/// What the revealed modal shows under the winner's name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AwardBody {
    Detail {
        text: String,
    },
    AttendanceStats {
        stats: Vec<StatSpec>,
        rankings: Vec<RankingLine>,
    },
}

/// Wire form; `presentation` is derived, never read from input.
#[derive(Deserialize)]
struct RawAward {
    tag: String,
    winner_name: String,
    short_description: String,
    #[serde(default)]
    long_detail: String,
    #[serde(default)]
    gallery: Vec<String>,
}

impl From<RawAward> for AwardEntry {
    fn from(raw: RawAward) -> Self {
        AwardEntry::new(
            raw.tag,
            raw.winner_name,
            raw.short_description,
            raw.long_detail,
            raw.gallery,
        )
    }
}

/// One award. Immutable once built; shared by reference with the sequencer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAward")]
pub struct AwardEntry {
    pub tag: String,
    pub winner_name: String,
    pub short_description: String,
    pub long_detail: String,
    /// Opaque image references in display order.
    pub gallery: Vec<String>,
    presentation: PresentationKind,
}

impl AwardEntry {
    pub fn new(
        tag: impl Into<String>,
        winner_name: impl Into<String>,
        short_description: impl Into<String>,
        long_detail: impl Into<String>,
        gallery: Vec<String>,
    ) -> Self {
        let tag = tag.into();
        let presentation = PresentationKind::for_tag(&tag);
        Self {
            tag,
            winner_name: winner_name.into(),
            short_description: short_description.into(),
            long_detail: long_detail.into(),
            gallery,
            presentation,
        }
    }

    pub fn presentation(&self) -> PresentationKind {
        self.presentation
    }

    pub fn image_fit(&self) -> ImageFit {
        self.presentation.image_fit()
    }

    pub fn body(&self) -> AwardBody {
        match self.presentation {
            PresentationKind::AttendanceStats => AwardBody::AttendanceStats {
                stats: attendance_stats(),
                rankings: attendance_rankings(),
            },
            PresentationKind::Standard | PresentationKind::RecruitmentGallery => {
                AwardBody::Detail {
                    text: self.long_detail.clone(),
                }
            }
        }
    }

    /// Sub-facts of `long_detail`, one per line.
    pub fn detail_lines(&self) -> impl Iterator<Item = &str> {
        self.long_detail.lines().filter(|l| !l.trim().is_empty())
    }

    pub fn has_carousel(&self) -> bool {
        self.gallery.len() > 1
    }
}
