use season_recap_core::counter::{quantize, step_for};
use season_recap_core::{CounterId, CounterSpec, FrameResult, NumericRollupCounter};

fn run_to_completion(end: f64, duration_s: f64, frame_ms: f64) -> (Vec<f64>, f64) {
    let spec = CounterSpec::new(end, "").with_duration(duration_s);
    let mut c = NumericRollupCounter::new(CounterId(0), &spec, 2.0);
    c.observe_visibility(true);
    let mut seen = Vec::new();
    let mut now = 250.0;
    loop {
        let result = c.frame(now);
        if result == FrameResult::Settled {
            break;
        }
        assert_eq!(result, FrameResult::Running);
        seen.push(c.displayed());
        now += frame_ms;
    }
    (seen, c.displayed())
}

#[test]
fn settles_exactly_on_target() {
    for &end in &[1.0, 24.0, 48.0, 56.3, 75.0, 100.0, 233.0, 3120.0, 1000.5] {
        for &duration in &[0.5, 1.0, 2.0] {
            let (_, last) = run_to_completion(end, duration, 16.7);
            assert_eq!(last, end, "end={end} duration={duration}");
        }
    }
}

#[test]
fn intermediate_values_are_stepped_and_monotonic() {
    for &end in &[24.0, 56.3, 233.0, 3120.0] {
        let step = step_for(end);
        let (seen, _) = run_to_completion(end, 2.0, 16.7);
        assert!(!seen.is_empty());
        for pair in seen.windows(2) {
            assert!(pair[1] >= pair[0], "end={end}: {} then {}", pair[0], pair[1]);
        }
        for v in &seen {
            assert_eq!(v % step, 0.0, "end={end}: {v} not a multiple of {step}");
            assert!(*v <= end);
        }
    }
}

#[test]
fn zero_target_needs_one_frame() {
    let (seen, last) = run_to_completion(0.0, 2.0, 16.7);
    assert!(seen.is_empty());
    assert_eq!(last, 0.0);
}

#[test]
fn non_positive_duration_settles_immediately() {
    let (seen, last) = run_to_completion(3120.0, 0.0, 16.7);
    assert!(seen.is_empty());
    assert_eq!(last, 3120.0);
}

#[test]
fn large_frame_gaps_still_land_on_target() {
    // one frame at start, one long after the duration
    let (seen, last) = run_to_completion(233.0, 2.0, 10_000.0);
    assert_eq!(seen, vec![0.0]);
    assert_eq!(last, 233.0);
}

#[test]
fn quantize_never_exceeds_target() {
    for i in 0..=1000 {
        let raw = 56.3 * i as f64 / 1000.0;
        assert!(quantize(raw, 56.3) <= 56.3);
    }
}
