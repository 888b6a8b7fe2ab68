use super::*;

#[test]
fn portfolio_page_is_valid() {
    let page = PageDef::portfolio();
    page.validate().unwrap();
    assert_eq!(page.sections.len(), 4);
    assert_eq!(page.section_index(&ElementId::from("projects")), Some(2));
    assert_eq!(page.section_index(&ElementId::from("nope")), None);
    assert_eq!(page.typing.text, "hi, i'm jadon leung");
}

#[test]
fn json_round_trip_preserves_page() {
    let page = PageDef::portfolio();
    let json = serde_json::to_string_pretty(&page).unwrap();
    let back = PageDef::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, page);
}

#[test]
fn minimal_json_fills_defaults() {
    let json = r#"{
        "title_id": "title",
        "sections": [{ "id": "about", "label": "about" }],
        "tracked": [
            { "id": "about", "effect": { "kind": "element" } },
            { "id": "bg", "effect": { "kind": "parallax" } }
        ],
        "reveal": { "observe": ["about"] }
    }"#;
    let page = PageDef::from_reader(json.as_bytes()).unwrap();
    page.validate().unwrap();
    assert_eq!(
        page.tracked[0].effect,
        EffectDef::Element {
            mapper: MapperConfig::default()
        }
    );
    assert_eq!(page.tracked[1].effect, EffectDef::Parallax { rate: 0.3 });
    assert_eq!(page.typing.interval_ms, 80);
    assert_eq!(page.nav.duration_ms, 600);
    assert!(page.reveal.stagger.is_none());
}

#[test]
fn duplicate_tracked_ids_are_rejected() {
    let mut page = PageDef::portfolio();
    let dup = page.tracked[0].clone();
    page.tracked.push(dup);
    let err = page.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate element id"));
}

#[test]
fn bad_knobs_are_rejected_with_element_context() {
    let mut page = PageDef::portfolio();
    page.tracked[1].effect = EffectDef::Element {
        mapper: MapperConfig::new(1.0, 2.0, 0.0, 0.0),
    };
    let err = page.validate().unwrap_err();
    assert!(err.to_string().contains("tracked 'title'"));
}

#[test]
fn empty_ids_are_rejected() {
    let mut page = PageDef::portfolio();
    page.title_id = ElementId::from("  ");
    assert!(page.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PageDef::from_reader("{ nope".as_bytes()).unwrap_err();
    assert!(matches!(err, ScrollFxError::Serde(_)));
}
