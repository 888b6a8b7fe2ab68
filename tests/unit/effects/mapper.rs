use super::*;
use crate::foundation::core::rect_from_top;

fn op_value(style: &StyleFrame, pick: fn(&TransformOp) -> Option<f64>) -> f64 {
    style.transform.iter().find_map(pick).unwrap()
}

fn scale_of(style: &StyleFrame) -> f64 {
    op_value(style, |op| match op {
        TransformOp::Scale(v) => Some(*v),
        _ => None,
    })
}

fn rotate_x_of(style: &StyleFrame) -> f64 {
    op_value(style, |op| match op {
        TransformOp::RotateX(v) => Some(*v),
        _ => None,
    })
}

fn translate_y_of(style: &StyleFrame) -> f64 {
    op_value(style, |op| match op {
        TransformOp::TranslateY(v) => Some(*v),
        _ => None,
    })
}

fn translate_x_of(style: &StyleFrame) -> f64 {
    op_value(style, |op| match op {
        TransformOp::TranslateX(v) => Some(*v),
        _ => None,
    })
}

#[test]
fn centered_element_is_untouched() {
    // Viewport 800, zero-height element at 400: exactly on the optimal line.
    let style = map_element(rect_from_top(400.0, 0.0), 800.0, &MapperConfig::default());
    assert_eq!(style.opacity, Some(1.0));
    assert_eq!(scale_of(&style), 1.0);
    assert_eq!(rotate_x_of(&style), 0.0);
    assert_eq!(translate_y_of(&style), 0.0);
    assert_eq!(style.blur_px, None);
}

#[test]
fn distance_is_normalized_and_signed() {
    let below = ViewportDistance::measure(rect_from_top(500.0, 200.0), 800.0);
    assert!((below.normalized - 0.25).abs() < 1e-12);
    assert_eq!(below.direction, 1.0);

    let above = ViewportDistance::measure(rect_from_top(0.0, 200.0), 800.0);
    assert!((above.normalized - 0.375).abs() < 1e-12);
    assert_eq!(above.direction, -1.0);

    let far = ViewportDistance::measure(rect_from_top(5_000.0, 10.0), 800.0);
    assert_eq!(far.normalized, 1.0);

    let degenerate = ViewportDistance::measure(rect_from_top(0.0, 10.0), 0.0);
    assert_eq!(degenerate.normalized, 1.0);
}

#[test]
fn generic_formula_matches_knobs() {
    let cfg = MapperConfig::section();
    // Center at 600: 200px below optimal, normalized 0.25.
    let style = map_element(rect_from_top(500.0, 200.0), 800.0, &cfg);
    assert!((style.opacity.unwrap() - 0.75).abs() < 1e-12);
    assert!((scale_of(&style) - 0.975).abs() < 1e-12);
    assert!((rotate_x_of(&style) - 2.0).abs() < 1e-12);
    assert!((translate_y_of(&style) - 6.25).abs() < 1e-12);
    assert_eq!(style.transform[0], TransformOp::Perspective(1000.0));

    // Mirrored above the line flips rotation and translation.
    let up = map_element(rect_from_top(100.0, 200.0), 800.0, &cfg);
    assert!((rotate_x_of(&up) + 2.0).abs() < 1e-12);
    assert!((translate_y_of(&up) + 6.25).abs() < 1e-12);
}

#[test]
fn opacity_bounded_and_non_increasing() {
    for fade in [0.0, 0.5, 1.0, 1.2, 1.5, 3.0] {
        let mut prev = f64::INFINITY;
        for i in 0..=100 {
            let d = f64::from(i) / 100.0;
            let o = fade_opacity(d, fade);
            assert!((0.0..=1.0).contains(&o));
            assert!(o <= prev);
            prev = o;
        }
    }
}

#[test]
fn scale_never_below_minimum() {
    for scale_min in [0.0, 0.7, 0.85, 0.92, 1.0] {
        assert_eq!(shrink_scale(0.0, scale_min), 1.0);
        for i in 0..=100 {
            let d = f64::from(i) / 50.0;
            assert!(shrink_scale(d, scale_min) >= scale_min);
        }
    }
}

#[test]
fn mapping_is_idempotent() {
    let rect = rect_from_top(-120.0, 340.0);
    let cfg = MapperConfig::headshot();
    assert_eq!(map_element(rect, 900.0, &cfg), map_element(rect, 900.0, &cfg));
}

#[test]
fn blur_grows_with_distance_when_enabled() {
    let cfg = MapperConfig {
        blur_max: 8.0,
        ..MapperConfig::default()
    };
    let style = map_element(rect_from_top(700.0, 200.0), 800.0, &cfg);
    // normalized 0.5
    assert_eq!(style.blur_px, Some(4.0));
}

#[test]
fn hero_is_pinned_near_top() {
    let pin = HeroPin::default();
    let cfg = MapperConfig::headshot();
    let rect = rect_from_top(-100.0, 600.0);
    let pinned = map_hero(rect, rect, 800.0, &pin, &cfg);
    assert_eq!(pinned, StyleFrame::identity());

    let rect = rect_from_top(-400.0, 600.0);
    let released = map_hero(rect, rect, 800.0, &pin, &cfg);
    assert_ne!(released, StyleFrame::identity());
    assert!(released.opacity.unwrap() < 1.0);
}

#[test]
fn hero_pin_follows_the_anchor_not_the_styled_element() {
    let pin = HeroPin::default();
    let cfg = MapperConfig::headshot();
    // Headshot still near the top, but the section above it has scrolled past the window.
    let headshot = rect_from_top(-104.0, 240.0);
    let section = rect_from_top(-200.0, 800.0);
    assert!(pin.is_pinned(headshot, 800.0));
    assert!(!pin.is_pinned(section, 800.0));
    assert_ne!(map_hero(headshot, section, 800.0, &pin, &cfg), StyleFrame::identity());

    let section = rect_from_top(-100.0, 800.0);
    let far = rect_from_top(-500.0, 240.0);
    assert_eq!(map_hero(far, section, 800.0, &pin, &cfg), StyleFrame::identity());
}

#[test]
fn list_items_alternate_sides() {
    let cfg = ListItemConfig::default();
    let rect = rect_from_top(700.0, 200.0); // normalized 0.5
    let even = map_list_item(rect, 800.0, 0, &cfg);
    let odd = map_list_item(rect, 800.0, 1, &cfg);
    assert_eq!(translate_x_of(&even), -10.0);
    assert_eq!(translate_x_of(&odd), 10.0);
    assert!((even.opacity.unwrap() - 0.4).abs() < 1e-12);
    assert!((scale_of(&even) - 0.925).abs() < 1e-12);
}

#[test]
fn fade_scale_has_no_motion() {
    let style = map_fade_scale(rect_from_top(700.0, 200.0), 800.0, &FadeScaleConfig::default());
    assert_eq!(style.transform.len(), 1);
    assert!((style.opacity.unwrap() - 0.35).abs() < 1e-12);
    assert!((scale_of(&style) - 0.9).abs() < 1e-12);
}

#[test]
fn parallax_tracks_raw_offset() {
    let style = map_parallax(1000.0, 0.3);
    assert_eq!(style.opacity, None);
    assert!((translate_y_of(&style) - 300.0).abs() < 1e-9);
}

#[test]
fn config_validation() {
    assert!(MapperConfig::default().validate().is_ok());
    assert!(MapperConfig::new(1.0, 1.5, 0.0, 0.0).validate().is_err());
    assert!(MapperConfig::new(-1.0, 0.5, 0.0, 0.0).validate().is_err());
    assert!(MapperConfig::new(f64::NAN, 0.5, 0.0, 0.0).validate().is_err());
    let bad_perspective = MapperConfig {
        perspective: Some(0.0),
        ..MapperConfig::default()
    };
    assert!(bad_perspective.validate().is_err());
}
