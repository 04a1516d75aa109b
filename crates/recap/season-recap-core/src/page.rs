//! RecapPage: owns the dataset, every counter, the section latches and the
//! reveal sequencer, and steps them together.
//!
//! Per update: apply inputs at the current time → advance sequencer timers →
//! mount/unmount modal counters from the sequencer's events → run one
//! animation frame for every counter at the new time → rebuild the frame.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hashbrown::HashMap;

use crate::award::{AwardBody, AwardEntry};
use crate::config::Config;
use crate::counter::{FrameResult, NumericRollupCounter};
use crate::dataset::SeasonDataset;
use crate::error::RecapResult;
use crate::ids::{CounterId, IdAllocator};
use crate::inputs::{Inputs, PageCommand};
use crate::outputs::{
    AwardCardView, CounterGroup, CounterView, ModalView, PageFrame, RecapEvent, SectionView,
};
use crate::reveal::{RevealEvent, RevealPhase, RevealSequencer};
use crate::visibility::{SectionKind, VisibilityLatch, VisibilityTarget};

#[derive(Debug)]
struct MountedCounter {
    label: String,
    group: CounterGroup,
    counter: NumericRollupCounter,
}

impl MountedCounter {
    fn view(&self) -> CounterView {
        CounterView {
            id: self.counter.id(),
            group: self.group,
            label: self.label.clone(),
            value: self.counter.displayed(),
            text: self.counter.label(),
            settled: self.counter.is_settled(),
        }
    }
}

#[derive(Debug)]
pub struct RecapPage<R = StdRng> {
    cfg: Config,
    dataset: SeasonDataset,
    ids: IdAllocator,
    report: Vec<MountedCounter>,
    modal_counters: Vec<MountedCounter>,
    sections: HashMap<SectionKind, VisibilityLatch>,
    sequencer: RevealSequencer<R>,
    now_ms: f64,
    disposed: bool,
    frame: PageFrame,
    /// Events raised between updates, reported by the next frame.
    pending: Vec<RecapEvent>,
}

impl RecapPage<StdRng> {
    /// Page with the generator seeded from `cfg.seed`.
    pub fn new(cfg: Config, dataset: SeasonDataset) -> RecapResult<Self> {
        let rng = StdRng::seed_from_u64(cfg.seed);
        Self::with_rng(cfg, dataset, rng)
    }
}

impl<R: Rng> RecapPage<R> {
    pub fn with_rng(cfg: Config, dataset: SeasonDataset, rng: R) -> RecapResult<Self> {
        cfg.validate()?;
        dataset.validate()?;

        let mut ids = IdAllocator::new();
        let report = dataset
            .season_report
            .iter()
            .map(|stat| MountedCounter {
                label: stat.label.clone(),
                group: CounterGroup::SeasonReport,
                counter: NumericRollupCounter::new(
                    ids.alloc_counter(),
                    &stat.counter,
                    cfg.counter_duration_s,
                ),
            })
            .collect();
        let sections = SectionKind::ALL
            .iter()
            .map(|s| (*s, VisibilityLatch::new()))
            .collect();

        let mut page = Self {
            sequencer: RevealSequencer::new(&cfg, rng),
            cfg,
            dataset,
            ids,
            report,
            modal_counters: Vec::new(),
            sections,
            now_ms: 0.0,
            disposed: false,
            frame: PageFrame::default(),
            pending: Vec::new(),
        };
        page.rebuild_views();
        Ok(page)
    }

    /// Click on the award card at `index`. Unknown indices are ignored.
    pub fn open_award(&mut self, index: usize) -> RevealPhase {
        match self.dataset.award(index) {
            Some(award) => self.sequencer.open(Some(award)),
            None => {
                warn!("open_award: no award at index {index}");
                self.pending.push(RecapEvent::Ignored {
                    reason: format!("no award at index {index}"),
                });
                self.sequencer.phase()
            }
        }
    }

    pub fn open_attendance_king(&mut self) -> RevealPhase {
        let king = self.dataset.attendance_king.clone();
        self.sequencer.open(Some(king))
    }

    pub fn close(&mut self) -> RevealPhase {
        self.sequencer.close()
    }

    /// Route an intersection report to its counter or section latch.
    pub fn set_visible(&mut self, target: VisibilityTarget, visible: bool) {
        match target {
            VisibilityTarget::Counter { id } => {
                let mounted = self
                    .report
                    .iter_mut()
                    .chain(self.modal_counters.iter_mut())
                    .find(|m| m.counter.id() == id);
                match mounted {
                    Some(m) => {
                        m.counter.observe_visibility(visible);
                    }
                    None => {
                        warn!("visibility for unknown counter {id:?}");
                        self.pending.push(RecapEvent::Ignored {
                            reason: format!("unknown counter {}", id.0),
                        });
                    }
                }
            }
            VisibilityTarget::Section { section } => {
                if self.sections.entry(section).or_default().observe(visible) {
                    debug!("section {section:?} revealed");
                }
            }
        }
    }

    fn apply(&mut self, cmd: PageCommand) {
        match cmd {
            PageCommand::OpenAward { index } => {
                self.open_award(index);
            }
            PageCommand::OpenAttendanceKing => {
                self.open_attendance_king();
            }
            PageCommand::Close => {
                self.close();
            }
            PageCommand::Visibility { target, visible } => self.set_visible(target, visible),
        }
    }

    /// Step the page by `dt_ms` with the given inputs and return the new frame.
    /// A non-finite `dt_ms` applies the inputs without moving time.
    pub fn update(&mut self, dt_ms: f64, inputs: Inputs) -> &PageFrame {
        self.frame.clear();
        if self.disposed {
            if !inputs.commands.is_empty() {
                warn!("update after dispose: {} commands dropped", inputs.commands.len());
            }
            self.rebuild_views();
            return &self.frame;
        }

        for cmd in inputs.commands {
            self.apply(cmd);
        }
        for event in self.pending.drain(..) {
            self.frame.push_event(event);
        }

        let dt_ms = if dt_ms.is_finite() {
            dt_ms.max(0.0)
        } else {
            warn!("update: non-finite step {dt_ms} treated as 0");
            0.0
        };
        self.sequencer.advance(dt_ms);
        self.now_ms += dt_ms;

        for event in self.sequencer.drain_events() {
            self.sync_modal_counters(&event);
            self.frame.push_event(RecapEvent::Reveal { event });
        }

        let now = self.now_ms;
        for mounted in self.report.iter_mut().chain(self.modal_counters.iter_mut()) {
            if mounted.counter.frame(now) == FrameResult::Settled {
                self.frame.events.push(RecapEvent::CounterSettled {
                    id: mounted.counter.id(),
                });
            }
        }

        self.rebuild_views();
        &self.frame
    }

    /// Modal counters live exactly as long as a revealed attendance award.
    fn sync_modal_counters(&mut self, event: &RevealEvent) {
        match event {
            RevealEvent::Opened { .. } | RevealEvent::Closed { .. } => self.unmount_modal_counters(),
            RevealEvent::Revealed { .. } => {
                let award = self.sequencer.active_award().cloned();
                if let Some(award) = award {
                    self.mount_modal_counters(&award);
                }
            }
            RevealEvent::CarouselAdvanced { .. } | RevealEvent::Cleared { .. } => {}
        }
    }

    fn mount_modal_counters(&mut self, award: &AwardEntry) {
        self.unmount_modal_counters();
        let AwardBody::AttendanceStats { stats, .. } = award.body() else {
            return;
        };
        for stat in stats {
            let mut counter = NumericRollupCounter::new(
                self.ids.alloc_counter(),
                &stat.counter,
                self.cfg.counter_duration_s,
            );
            // The modal covers the viewport, so its counters are visible on mount.
            counter.observe_visibility(true);
            self.modal_counters.push(MountedCounter {
                label: stat.label,
                group: CounterGroup::AttendanceStats,
                counter,
            });
        }
        debug!("mounted {} modal counters", self.modal_counters.len());
    }

    fn unmount_modal_counters(&mut self) {
        for mut mounted in self.modal_counters.drain(..) {
            mounted.counter.teardown();
        }
    }

    fn rebuild_views(&mut self) {
        self.frame.now_ms = self.now_ms;
        self.frame.counters = self
            .report
            .iter()
            .chain(self.modal_counters.iter())
            .map(MountedCounter::view)
            .collect();
        self.frame.modal = ModalView::from(self.sequencer.state());
        self.frame.sections = SectionKind::ALL
            .iter()
            .map(|s| SectionView {
                section: *s,
                revealed: self
                    .sections
                    .get(s)
                    .is_some_and(VisibilityLatch::has_been_visible),
            })
            .collect();
    }

    /// Tear down every counter and the sequencer. Later updates are inert.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for mounted in self.report.iter_mut() {
            mounted.counter.teardown();
        }
        self.unmount_modal_counters();
        self.sequencer.dispose();
        self.pending.clear();
        self.disposed = true;
        debug!("page disposed at {}ms", self.now_ms);
    }

    pub fn frame(&self) -> &PageFrame {
        &self.frame
    }

    pub fn dataset(&self) -> &SeasonDataset {
        &self.dataset
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn sequencer(&self) -> &RevealSequencer<R> {
        &self.sequencer
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Ids of the season report counters, in dataset order.
    pub fn report_counter_ids(&self) -> Vec<CounterId> {
        self.report.iter().map(|m| m.counter.id()).collect()
    }

    pub fn cards(&self) -> Vec<AwardCardView> {
        self.dataset
            .awards
            .iter()
            .enumerate()
            .map(|(index, a)| AwardCardView {
                index,
                tag: a.tag.clone(),
            })
            .collect()
    }
}
