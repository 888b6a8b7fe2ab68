use super::*;

#[test]
fn many_requests_collapse_into_one_frame() {
    let mut gate = FrameGate::new();
    assert!(gate.request());
    for _ in 0..9 {
        assert!(!gate.request());
    }
    assert!(gate.is_pending());
    assert!(gate.begin_frame());
    assert!(!gate.is_pending());
    assert_eq!(gate.requested(), 1);
    assert_eq!(gate.coalesced(), 9);
}

#[test]
fn frame_without_request_is_noop() {
    let mut gate = FrameGate::new();
    assert!(!gate.begin_frame());
    assert!(gate.request());
    assert!(gate.begin_frame());
    assert!(!gate.begin_frame());
    assert!(gate.request());
    assert_eq!(gate.requested(), 2);
}
