use super::*;

fn run_to_end(tw: &mut TypeWriter, guard: &mut TypedOnce) -> (Vec<TypingOutput>, u64) {
    let (mut elapsed, mut step) = tw.first_step();
    let mut outputs = Vec::new();
    loop {
        let res = tw.step(step, guard);
        outputs.extend(res.outputs);
        match res.next {
            Some((delay, next)) => {
                elapsed += delay;
                step = next;
            }
            None => return (outputs, elapsed),
        }
    }
}

#[test]
fn guard_claims_once_and_typed_never_resets() {
    let mut g = TypedOnce::default();
    assert!(!g.is_typed());
    assert!(g.claim());
    assert!(!g.claim());
    g.finish();
    assert!(g.is_typed());
    assert!(!g.claim());
    assert!(g.is_typed());
}

#[test]
fn types_full_text_one_char_at_a_time() {
    let cfg = TypingConfig {
        text: "hey".to_owned(),
        ..TypingConfig::default()
    };
    let mut tw = TypeWriter::new(cfg);
    let mut guard = TypedOnce::default();
    let (outputs, elapsed) = run_to_end(&mut tw, &mut guard);
    assert_eq!(
        outputs,
        vec![
            TypingOutput::Text(String::new()),
            TypingOutput::Cursor("3px solid white".to_owned()),
            TypingOutput::Text("h".to_owned()),
            TypingOutput::Text("he".to_owned()),
            TypingOutput::Text("hey".to_owned()),
            TypingOutput::Cursor("none".to_owned()),
        ]
    );
    // 500 initial + 4 ticks of 80 (3 chars + completion tick) + 1000 linger.
    assert_eq!(elapsed, 500 + 4 * 80 + 1000);
    assert!(guard.is_typed());
    assert_eq!(tw.visible_text(), "hey");
}

#[test]
fn multibyte_characters_are_never_split() {
    let cfg = TypingConfig {
        text: "héllo ✨".to_owned(),
        ..TypingConfig::default()
    };
    let mut tw = TypeWriter::new(cfg);
    let mut guard = TypedOnce::default();
    let (outputs, _) = run_to_end(&mut tw, &mut guard);
    let texts: Vec<&str> = outputs
        .iter()
        .filter_map(|o| match o {
            TypingOutput::Text(t) if !t.is_empty() => Some(t.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 7);
    assert_eq!(texts[1], "hé");
    assert_eq!(*texts.last().unwrap(), "héllo ✨");
}

#[test]
fn empty_text_finishes_immediately() {
    let cfg = TypingConfig {
        text: String::new(),
        ..TypingConfig::default()
    };
    let mut tw = TypeWriter::new(cfg);
    let mut guard = TypedOnce::default();
    tw.step(TypingStep::Begin, &mut guard);
    let res = tw.step(TypingStep::NextChar, &mut guard);
    assert!(res.outputs.is_empty());
    assert_eq!(res.next, Some((1000, TypingStep::RemoveCursor)));
    assert!(guard.is_typed());
}

#[test]
fn zero_interval_is_rejected() {
    let cfg = TypingConfig {
        interval_ms: 0,
        ..TypingConfig::default()
    };
    assert!(cfg.validate().is_err());
}
