use super::*;

#[test]
fn samples_endpoints_and_clamps_past_end() {
    let t = Tween::new(0.0, 1000.0, Millis(100), 600, Ease::InOutCubic);
    assert_eq!(t.sample(Millis(0)), 0.0);
    assert_eq!(t.sample(Millis(100)), 0.0);
    assert_eq!(t.sample(Millis(700)), 1000.0);
    assert_eq!(t.sample(Millis(5_000)), 1000.0);
    assert!(!t.is_done(Millis(699)));
    assert!(t.is_done(Millis(700)));
}

#[test]
fn midpoint_of_symmetric_curve_is_halfway() {
    let t = Tween::new(200.0, 600.0, Millis(0), 400, Ease::InOutCubic);
    assert!((t.sample(Millis(200)) - 400.0).abs() < 1e-9);
}

#[test]
fn zero_duration_finishes_after_one_ms() {
    let t = Tween::new(0.0, 50.0, Millis(10), 0, Ease::Linear);
    assert!(!t.is_done(Millis(10)));
    assert!(t.is_done(Millis(11)));
    assert_eq!(t.sample(Millis(11)), 50.0);
}

#[test]
fn retarget_continues_from_current_position() {
    let mut t = Tween::new(0.0, 1000.0, Millis(0), 1000, Ease::Linear);
    t.retarget(Millis(250), 0.0, 500);
    assert_eq!(t.sample(Millis(250)), 250.0);
    assert_eq!(t.target(), 0.0);
    assert_eq!(t.sample(Millis(750)), 0.0);
}
