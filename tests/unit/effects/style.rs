use super::*;

#[test]
fn numbers_are_compact() {
    assert_eq!(fmt_num(1.0), "1");
    assert_eq!(fmt_num(0.85), "0.85");
    assert_eq!(fmt_num(-0.0), "0");
    assert_eq!(fmt_num(-0.00001), "0");
    assert_eq!(fmt_num(12.345678), "12.3457");
}

#[test]
fn identity_renders_none() {
    let s = StyleFrame::identity();
    assert_eq!(s.transform_css(), "none");
    assert_eq!(s.to_css(), "opacity: 1; transform: none");
}

#[test]
fn transform_ops_render_in_order() {
    let s = StyleFrame {
        opacity: Some(0.4),
        transform: vec![
            TransformOp::Perspective(1000.0),
            TransformOp::TranslateY(15.0),
            TransformOp::RotateX(-7.5),
            TransformOp::Scale(0.9),
        ],
        blur_px: Some(2.0),
    };
    assert_eq!(
        s.to_css(),
        concat!(
            "opacity: 0.4; ",
            "transform: perspective(1000px) translateY(15px) rotateX(-7.5deg) scale(0.9); ",
            "filter: blur(2px)"
        )
    );
}

#[test]
fn zero_blur_is_omitted() {
    let s = StyleFrame {
        opacity: None,
        transform: vec![TransformOp::TranslateX(-20.0), TransformOp::Rotate(1.0)],
        blur_px: Some(0.0),
    };
    assert_eq!(s.filter_css(), None);
    assert_eq!(s.to_css(), "transform: translateX(-20px) rotate(1deg)");
}
