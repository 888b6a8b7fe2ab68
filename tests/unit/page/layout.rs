use super::*;

fn two_blocks() -> StaticLayout {
    StaticLayout {
        viewport_height: 800.0,
        document_height: None,
        blocks: vec![
            BlockDef {
                id: ElementId::from("a"),
                top: 0.0,
                height: 1000.0,
                fixed: false,
            },
            BlockDef {
                id: ElementId::from("b"),
                top: 1000.0,
                height: 1800.0,
                fixed: false,
            },
            BlockDef {
                id: ElementId::from("bg"),
                top: 0.0,
                height: 800.0,
                fixed: true,
            },
        ],
    }
}

#[test]
fn scroll_height_defaults_to_lowest_block() {
    let l = two_blocks();
    l.validate().unwrap();
    assert_eq!(l.scroll_height(), 2800.0);
    assert_eq!(l.max_scroll(), 2000.0);
}

#[test]
fn rects_shift_with_offset_except_fixed() {
    let l = two_blocks();
    let g = l.geometry_at(300.0);
    assert_eq!(g.viewport_height, 800.0);
    assert_eq!(g.rect(&ElementId::from("b")).unwrap().y0, 700.0);
    assert_eq!(g.rect(&ElementId::from("a")).unwrap().y0, -300.0);
    assert_eq!(g.rect(&ElementId::from("bg")).unwrap().y0, 0.0);
    assert_eq!(g.rect(&ElementId::from("missing")), None);
}

#[test]
fn offsets_are_clamped_to_range() {
    let l = two_blocks();
    assert_eq!(l.metrics_at(9_999.0).unwrap().offset, 2000.0);
    assert_eq!(l.metrics_at(-10.0).unwrap().offset, 0.0);
    assert_eq!(
        l.geometry_at(9_999.0).rect(&ElementId::from("b")).unwrap().y0,
        -1000.0
    );
}

#[test]
fn invalid_layouts_are_rejected() {
    let mut l = two_blocks();
    l.viewport_height = 0.0;
    assert!(l.validate().is_err());

    let mut l = two_blocks();
    l.blocks[0].height = -1.0;
    assert!(l.validate().is_err());

    let mut l = two_blocks();
    l.document_height = Some(f64::NAN);
    assert!(l.validate().is_err());
}

#[test]
fn portfolio_layout_covers_every_tracked_element() {
    let page = crate::page::model::PageDef::portfolio();
    let layout = StaticLayout::portfolio(800.0);
    layout.validate().unwrap();
    let g = layout.geometry_at(0.0);
    for t in &page.tracked {
        assert!(g.rect(&t.id).is_some(), "missing {}", t.id);
    }
    for s in &page.sections {
        assert!(g.rect(&s.id).is_some(), "missing {}", s.id);
    }
    assert!(layout.max_scroll() > 0.0);
}
