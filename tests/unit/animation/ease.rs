use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
        assert_eq!(ease.apply(f64::NAN), 0.0);
    }
}

#[test]
fn lerp_walks_between_endpoints() {
    assert_eq!(Ease::Linear.lerp(100.0, 300.0, 0.5), 200.0);
    assert_eq!(Ease::InOutCubic.lerp(300.0, 100.0, 1.0), 100.0);
    assert_eq!(Ease::InOutCubic.lerp(300.0, 100.0, 0.0), 300.0);
}

#[test]
fn default_is_in_out_cubic() {
    assert_eq!(Ease::default(), Ease::InOutCubic);
    let json = serde_json::to_string(&Ease::SmoothStep).unwrap();
    assert_eq!(json, "\"SmoothStep\"");
}
