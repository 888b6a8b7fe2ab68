use super::*;

#[test]
fn five_items_cascade_every_80ms() {
    let cfg = StaggerConfig {
        interval_ms: 80,
        jitter: false,
        seed: 0,
    };
    let steps = plan_stagger(&cfg, "projects", 5, Millis(1_000));
    let times: Vec<u64> = steps.iter().map(|s| s.at.0).collect();
    assert_eq!(times, vec![1_000, 1_080, 1_160, 1_240, 1_320]);
    assert!(steps.iter().enumerate().all(|(i, s)| s.index == i));
    assert!(steps.iter().all(|s| s.jitter.is_none()));
}

#[test]
fn empty_container_plans_nothing() {
    assert!(plan_stagger(&StaggerConfig::default(), "projects", 0, Millis(0)).is_empty());
}

#[test]
fn jitter_is_bounded_and_deterministic() {
    for i in 0..50 {
        let j = Jitter::for_child(9, "projects", i);
        assert!((-1.0..1.0).contains(&j.rotation_deg));
        assert!((0.98..1.02).contains(&j.scale));
        assert_eq!(j, Jitter::for_child(9, "projects", i));
    }
    assert_ne!(
        Jitter::for_child(9, "projects", 0),
        Jitter::for_child(9, "projects", 1)
    );
}

#[test]
fn zero_interval_is_rejected() {
    let cfg = StaggerConfig {
        interval_ms: 0,
        ..StaggerConfig::default()
    };
    assert!(cfg.validate().is_err());
    assert!(StaggerConfig::default().validate().is_ok());
}
