//! Season data: award entries, the attendance king and the season report.
//!
//! The page ships with `SeasonDataset::fckt_2025()` compiled in. Hosts may
//! load a replacement from JSON; it is validated once and then read-only.

use std::sync::Arc;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::award::{AwardEntry, StatSpec};
use crate::error::{RecapError, RecapResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonDataset {
    pub title: String,
    /// Date and venue line under the hero title.
    #[serde(default)]
    pub event_line: String,
    /// Roll-up statistics in the season report section.
    #[serde(default)]
    pub season_report: Vec<StatSpec>,
    /// Award cards in display order.
    pub awards: Vec<Arc<AwardEntry>>,
    /// The hall-of-fame card, opened separately from the award grid.
    pub attendance_king: Arc<AwardEntry>,
}

fn assets(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| format!("assets/{n}.png")).collect()
}

impl SeasonDataset {
    /// Decode and validate a dataset.
    pub fn from_json(json: &str) -> RecapResult<Self> {
        let data: SeasonDataset = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Tags must be non-empty and unique across the grid and the hall of fame.
    pub fn validate(&self) -> RecapResult<()> {
        let mut seen = HashSet::new();
        for award in self.all_awards() {
            if award.tag.trim().is_empty() {
                return Err(RecapError::InvalidDataset {
                    reason: format!("award for '{}' has an empty tag", award.winner_name),
                });
            }
            if !seen.insert(award.tag.as_str()) {
                return Err(RecapError::InvalidDataset {
                    reason: format!("duplicate award tag '{}'", award.tag),
                });
            }
        }
        Ok(())
    }

    /// Grid awards followed by the attendance king.
    pub fn all_awards(&self) -> impl Iterator<Item = &Arc<AwardEntry>> {
        self.awards
            .iter()
            .chain(std::iter::once(&self.attendance_king))
    }

    pub fn award(&self, index: usize) -> Option<Arc<AwardEntry>> {
        self.awards.get(index).cloned()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<Arc<AwardEntry>> {
        self.all_awards().find(|a| a.tag == tag).cloned()
    }

    /// FCKT 2025 season.
    pub fn fckt_2025() -> Self {
        let awards = vec![
            AwardEntry::new(
                "TOP SCORER",
                "임강현",
                "2025 시즌 최다 득점 기록",
                "시즌 내내 압도적인 득점력으로 팀의 승리를 이끈 에이스",
                assets(&[
                    "8edcce207d4d2279e86ba22d150fa7f0a5424b82",
                    "7ecfa1e9848db70299e7470e99a6ab16b7085248",
                    "093b51eb9adba80521cb5e13d4235cf906a024c0",
                ]),
            ),
            AwardEntry::new(
                "MULTI-PLAYER",
                "장성준",
                "전 포지션을 아우르는 활약",
                "공격수부터 수비까지 모든 포지션을 소화하며 팀의 만능 플레이어로 활약",
                Vec::new(),
            ),
            AwardEntry::new(
                "PASSION AWARD",
                "윤원",
                "경기장 위의 끊임없는 투혼",
                "경기 시작부터 종료까지 멈추지 않는 열정으로 팀에 활력을 불어넣음",
                Vec::new(),
            ),
            AwardEntry::new(
                "LONG DISTANCE",
                "이대열",
                "몽골 입국 당일 경기장 직행",
                "몽골 출장에서 돌아온 그날 저녁, 피곤함을 뒤로하고 경기장에 나타난 진정한 헌신",
                Vec::new(),
            ),
            AwardEntry::new(
                "COMMUNICATION",
                "이종찬",
                "당직과 난관을 뚫은 참여 의지",
                "어려운 근무 스케줄 속에서도 팀과의 약속을 지키기 위해 최선을 다한 열정",
                Vec::new(),
            ),
            AwardEntry::new(
                "WARRIOR SPIRIT",
                "이진우",
                "부상을 딛고 일어선 불굴의 의지",
                "아킬레스 부상에도 불구하고 긴 재활 과정을 거쳐 경기장으로 복귀한 진정한 전사. \
                 통증을 극복하고 팀을 향한 열정을 포기하지 않은 정신력",
                assets(&["551a30f193b6045b6c5f6dfbde9186f9fbf67a38"]),
            ),
            AwardEntry::new(
                "RECRUITMENT AWARD",
                "김청운",
                "팀의 성장을 이끈 전도사",
                "장성준을 팀에 영입하여 새로운 활력을 불어넣고, 팀의 전력 향상에 크게 기여한 공로",
                assets(&[
                    "611c0400101768421892f8fd24afb526a31d3928",
                    "ea03cd5d7e3a69931917884d42198fbe85aa4df8",
                ]),
            ),
        ];

        let attendance_king = AwardEntry::new(
            "ATTENDANCE KING",
            "전대현",
            "2025 SEASON ATTENDANCE KING",
            "출석률 100% | 총 이동거리 3,120km | 이동시간 48시간\n\
             공동 2등: 이진우, 정세진 (88%) | 4등: 이대열 (67%)",
            Vec::new(),
        );

        Self {
            title: "THE YEAR-END: [FCKT. 2025]".into(),
            event_line: "2025. 12. 21 (SUN) 17:00 | 칸지고고 과천 중앙동점".into(),
            season_report: vec![
                StatSpec::new("Total Meetings", 24.0, ""),
                StatSpec::new("Total Win Rate", 56.3, "%"),
                StatSpec::new("Total Participants", 233.0, ""),
                StatSpec::new("2nd Half Win Rate", 75.0, "%"),
            ],
            awards: awards.into_iter().map(Arc::new).collect(),
            attendance_king: Arc::new(attendance_king),
        }
    }
}

impl Default for SeasonDataset {
    fn default() -> Self {
        Self::fckt_2025()
    }
}
