use super::*;

#[test]
fn in_memory_sink_keeps_order_and_filters_by_target() {
    let about = ElementId::from("about");
    let mut sink = InMemoryDomSink::new();
    sink.write(DomWrite::ProgressBar { percent: 10.0 }).unwrap();
    sink.write(DomWrite::AddClass {
        target: about.clone(),
        class: "animate-in".to_owned(),
    })
    .unwrap();
    sink.write(DomWrite::Style {
        target: ElementId::from("title"),
        style: StyleFrame::identity(),
    })
    .unwrap();

    assert_eq!(sink.writes().len(), 3);
    assert_eq!(sink.writes_for(&about).count(), 1);
    assert_eq!(sink.drain().len(), 3);
    assert!(sink.writes().is_empty());
}

#[test]
fn json_lines_sink_emits_tagged_objects() {
    let mut sink = JsonLinesSink::new(Vec::<u8>::new());
    sink.write(DomWrite::NavIndicator { index: -1 }).unwrap();
    sink.write(DomWrite::Text {
        target: ElementId::from("title"),
        text: "hi".to_owned(),
    })
    .unwrap();
    assert_eq!(sink.written(), 2);
    let bytes = sink.finish().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], r#"{"kind":"nav_indicator","index":-1}"#);
    assert_eq!(
        lines[1],
        r#"{"kind":"text","target":"title","text":"hi"}"#
    );
}
