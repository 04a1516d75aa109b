use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use season_recap_core::{
    AwardEntry, Config, RevealEvent, RevealPhase, RevealSequencer, RevealTimer,
};

fn sequencer(seed: u64) -> RevealSequencer {
    RevealSequencer::new(&Config::default(), StdRng::seed_from_u64(seed))
}

fn award(tag: &str, images: usize) -> Arc<AwardEntry> {
    Arc::new(AwardEntry::new(
        tag,
        "winner",
        "description",
        "detail",
        (0..images).map(|i| format!("assets/{i}.png")).collect(),
    ))
}

#[test]
fn close_before_delay_never_reveals() {
    let mut s = sequencer(1);
    s.open(Some(award("TOP SCORER", 3)));
    s.advance(1_499.0);
    assert_eq!(s.phase(), RevealPhase::Wrapped);
    s.close();
    s.advance(10_000.0);

    assert_eq!(s.phase(), RevealPhase::Closed);
    assert!(s.state().particles.is_empty());
    assert_eq!(s.pending(RevealTimer::Carousel), 0);
    let events = s.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, RevealEvent::Revealed { .. } | RevealEvent::CarouselAdvanced { .. })));
}

#[test]
fn reveals_at_exactly_the_delay_with_fifty_particles() {
    for seed in 0..20 {
        let mut s = sequencer(seed);
        s.open(Some(award("PASSION AWARD", 0)));
        s.advance(1_499.0);
        assert_eq!(s.phase(), RevealPhase::Wrapped);
        assert!(s.state().particles.is_empty());
        s.advance(1.0);
        assert_eq!(s.phase(), RevealPhase::Revealed);

        let particles = &s.state().particles;
        assert_eq!(particles.len(), 50);
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.id as usize, i);
            assert!(p.horizontal_position >= 0.0 && p.horizontal_position < 100.0);
            assert!(p.start_delay >= 0.0 && p.start_delay < 0.5);
        }
    }
}

#[test]
fn three_image_gallery_cycles_until_close() {
    let mut s = sequencer(7);
    s.open(Some(award("TOP SCORER", 3)));
    s.advance(1_500.0);
    assert_eq!(s.state().carousel_index(), Some(0));

    let mut seen = Vec::new();
    for _ in 0..7 {
        s.advance(1_500.0);
        seen.push(s.state().carousel_index().unwrap());
    }
    assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1]);

    s.close();
    let index_at_close = s.state().carousel.index();
    s.advance(6_000.0);
    assert_eq!(s.pending(RevealTimer::Carousel), 0);
    assert!(!s
        .drain_events()
        .iter()
        .any(|e| matches!(e, RevealEvent::CarouselAdvanced { at_ms, .. } if *at_ms > 12_000.0)));
    assert_eq!(s.state().carousel_index(), None);
    assert_eq!(index_at_close, 1);
}

#[test]
fn one_big_step_fires_reveal_before_ticks() {
    let mut s = sequencer(2);
    s.open(Some(award("TOP SCORER", 3)));
    s.advance(6_000.0);
    // reveal at 1500, ticks at 3000, 4500, 6000 folded into one advance
    let events = s.drain_events();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            RevealEvent::Opened { .. } => "opened",
            RevealEvent::Revealed { .. } => "revealed",
            RevealEvent::CarouselAdvanced { .. } => "tick",
            RevealEvent::Closed { .. } => "closed",
            RevealEvent::Cleared { .. } => "cleared",
        })
        .collect();
    assert_eq!(kinds, vec!["opened", "revealed", "tick"]);
    assert!(matches!(
        events[2],
        RevealEvent::CarouselAdvanced { steps: 3, index: 0, at_ms, .. } if at_ms == 6_000.0
    ));
    assert_eq!(s.state().carousel_index(), Some(0));
}

#[test]
fn long_suspended_step_yields_one_carousel_event() {
    let mut s = sequencer(8);
    s.open(Some(award("TOP SCORER", 3)));
    s.advance(1_500.0);
    s.drain_events();

    // 1.5e9 ms is a million carousel periods.
    s.advance(1.5e9);
    let events = s.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        RevealEvent::CarouselAdvanced { steps: 1_000_000, index: 1, .. }
    ));
    assert_eq!(s.state().carousel_index(), Some(1));
    assert_eq!(s.pending(RevealTimer::Carousel), 1);

    s.advance(1_500.0);
    assert_eq!(s.state().carousel_index(), Some(2));
}

#[test]
fn non_finite_step_leaves_time_and_state_alone() {
    let mut s = sequencer(9);
    s.open(Some(award("TOP SCORER", 3)));
    s.advance(1_500.0);
    s.drain_events();

    for dt in [f64::INFINITY, f64::NAN, f64::NEG_INFINITY] {
        assert_eq!(s.advance(dt), RevealPhase::Revealed);
    }
    assert_eq!(s.now_ms(), 1_500.0);
    assert!(s.drain_events().is_empty());
    assert_eq!(s.state().carousel_index(), Some(0));

    s.advance(1_500.0);
    assert_eq!(s.state().carousel_index(), Some(1));
}

#[test]
fn small_galleries_get_no_carousel_timer() {
    for images in [0, 1] {
        let mut s = sequencer(3);
        s.open(Some(award("WARRIOR SPIRIT", images)));
        s.advance(1_500.0);
        assert_eq!(s.phase(), RevealPhase::Revealed);
        assert_eq!(s.pending(RevealTimer::Carousel), 0);
        s.advance(5_000.0);
        let expected = if images == 0 { None } else { Some(0) };
        assert_eq!(s.state().carousel_index(), expected);
    }
}

#[test]
fn active_award_survives_close_for_the_grace_delay() {
    let mut s = sequencer(4);
    s.open(Some(award("LONG DISTANCE", 0)));
    s.advance(2_000.0);
    s.close();
    assert_eq!(s.phase(), RevealPhase::Closed);
    assert!(s.active_award().is_some());

    s.advance(299.0);
    assert!(s.active_award().is_some());
    s.advance(1.0);
    assert!(s.active_award().is_none());
}

#[test]
fn close_while_wrapped_keeps_grace_too() {
    let mut s = sequencer(5);
    s.open(Some(award("COMMUNICATION", 2)));
    s.advance(500.0);
    s.close();
    assert_eq!(s.pending(RevealTimer::Reveal), 0);
    s.advance(299.0);
    assert_eq!(s.active_award().map(|a| a.tag.as_str()), Some("COMMUNICATION"));
    s.advance(1.0);
    assert!(s.active_award().is_none());
}

#[test]
fn injected_rng_makes_bursts_reproducible() {
    let run = |seed| {
        let mut s = sequencer(seed);
        s.open(Some(award("TOP SCORER", 0)));
        s.advance(1_500.0);
        s.state().particles.clone()
    };
    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}

#[test]
fn reopening_regenerates_particles_only_after_new_delay() {
    let mut s = sequencer(6);
    s.open(Some(award("TOP SCORER", 0)));
    s.advance(1_500.0);
    assert_eq!(s.state().particles.len(), 50);

    s.open(Some(award("MULTI-PLAYER", 0)));
    assert_eq!(s.phase(), RevealPhase::Wrapped);
    assert!(s.state().particles.is_empty());
    s.advance(1_500.0);
    assert_eq!(s.state().particles.len(), 50);
}
