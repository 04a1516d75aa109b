use season_recap_core::{
    AwardBody, Config, CounterGroup, ImageFit, Inputs, PageCommand, PresentationKind, RecapEvent,
    RecapPage, RevealEvent, RevealPhase, SeasonDataset, VisibilityTarget,
};

fn page() -> RecapPage {
    RecapPage::new(Config::default(), SeasonDataset::fckt_2025()).expect("page")
}

fn step(p: &mut RecapPage, dt_ms: f64) {
    p.update(dt_ms, Inputs::default());
}

#[test]
fn season_report_counters_wait_for_visibility() {
    let mut p = page();
    let ids = p.report_counter_ids();
    step(&mut p, 5_000.0);
    assert!(p.frame().counters.iter().all(|c| c.value == 0.0));

    let inputs = Inputs {
        commands: ids
            .iter()
            .map(|id| PageCommand::Visibility {
                target: VisibilityTarget::Counter { id: *id },
                visible: true,
            })
            .collect(),
    };
    p.update(16.0, inputs);
    // first frame only records the start time
    assert!(p.frame().counters.iter().all(|c| c.value == 0.0));

    step(&mut p, 1_000.0);
    let mid = p.frame().counter(ids[2]).unwrap().value;
    assert!(mid > 0.0 && mid < 233.0);
    assert_eq!(mid % 5.0, 0.0);

    step(&mut p, 1_000.0);
    let texts: Vec<String> = p.frame().counters.iter().map(|c| c.text.clone()).collect();
    assert_eq!(texts, vec!["24", "56.3%", "233", "75%"]);
    let settled = p
        .frame()
        .events
        .iter()
        .filter(|e| matches!(e, RecapEvent::CounterSettled { .. }))
        .count();
    assert_eq!(settled, 4);
}

#[test]
fn attendance_king_mounts_fixed_stat_counters_on_reveal() {
    let mut p = page();
    p.update(0.0, Inputs::one(PageCommand::OpenAttendanceKing));
    assert_eq!(p.frame().modal.phase, RevealPhase::Wrapped);
    assert!(p
        .frame()
        .counters
        .iter()
        .all(|c| c.group == CounterGroup::SeasonReport));

    step(&mut p, 1_500.0);
    let modal = &p.frame().modal;
    assert_eq!(modal.phase, RevealPhase::Revealed);
    let award = modal.award.as_ref().unwrap();
    assert_eq!(award.presentation, PresentationKind::AttendanceStats);
    assert!(matches!(award.body, AwardBody::AttendanceStats { .. }));

    step(&mut p, 2_000.0);
    let stats: Vec<String> = p
        .frame()
        .counters
        .iter()
        .filter(|c| c.group == CounterGroup::AttendanceStats)
        .map(|c| c.text.clone())
        .collect();
    assert_eq!(stats, vec!["100%", "3120km", "48시간"]);
}

#[test]
fn closing_mid_rollup_tears_down_modal_counters() {
    let mut p = page();
    p.update(0.0, Inputs::one(PageCommand::OpenAttendanceKing));
    step(&mut p, 1_500.0);
    step(&mut p, 500.0);
    p.update(0.0, Inputs::one(PageCommand::Close));
    assert!(p
        .frame()
        .counters
        .iter()
        .all(|c| c.group == CounterGroup::SeasonReport));
    // award stays readable during the exit transition
    assert_eq!(p.frame().modal.phase, RevealPhase::Closed);
    assert!(p.frame().modal.award.is_some());

    step(&mut p, 300.0);
    assert!(p.frame().modal.award.is_none());
    assert!(p
        .frame()
        .events
        .iter()
        .any(|e| matches!(e, RecapEvent::Reveal { event: RevealEvent::Cleared { .. } })));
}

#[test]
fn recruitment_gallery_uses_contain_fit_and_cycles() {
    let mut p = page();
    let index = p
        .cards()
        .iter()
        .find(|c| c.tag == "RECRUITMENT AWARD")
        .map(|c| c.index)
        .unwrap();
    p.update(0.0, Inputs::one(PageCommand::OpenAward { index }));
    step(&mut p, 1_500.0);
    let award = p.frame().modal.award.clone().unwrap();
    assert_eq!(award.image_fit, ImageFit::Contain);
    assert_eq!(p.frame().modal.carousel_index, Some(0));
    assert_eq!(p.frame().modal.particles.len(), 50);

    step(&mut p, 1_500.0);
    assert_eq!(p.frame().modal.carousel_index, Some(1));
    step(&mut p, 1_500.0);
    assert_eq!(p.frame().modal.carousel_index, Some(0));
}

#[test]
fn standard_awards_render_literal_detail_with_cover_fit() {
    let mut p = page();
    for card in p.cards() {
        if card.tag == "RECRUITMENT AWARD" {
            continue;
        }
        p.update(0.0, Inputs::one(PageCommand::OpenAward { index: card.index }));
        step(&mut p, 1_500.0);
        let award = p.frame().modal.award.clone().unwrap();
        let expected = p.dataset().awards[card.index].long_detail.clone();
        assert_eq!(award.image_fit, ImageFit::Cover);
        assert_eq!(award.body, AwardBody::Detail { text: expected });
        p.update(0.0, Inputs::one(PageCommand::Close));
        step(&mut p, 300.0);
    }
}

#[test]
fn dispose_stops_all_timers_and_frames() {
    let mut p = page();
    let ids = p.report_counter_ids();
    p.set_visible(VisibilityTarget::Counter { id: ids[0] }, true);
    p.update(0.0, Inputs::one(PageCommand::OpenAward { index: 0 }));
    step(&mut p, 1_600.0);
    let value_before = p.frame().counter(ids[0]).unwrap().value;

    p.dispose();
    let frame = p.update(10_000.0, Inputs::one(PageCommand::OpenAttendanceKing));
    assert!(frame.events.is_empty());
    assert_eq!(frame.modal.phase, RevealPhase::Closed);
    assert_eq!(frame.counter(ids[0]).unwrap().value, value_before);
    assert!(p.sequencer().is_disposed());
}
