use super::*;

fn drain(q: &mut TimerQueue<&'static str>, now: Millis) -> Vec<&'static str> {
    let mut out = Vec::new();
    while let Some((_, _, task)) = q.pop_due(now) {
        out.push(task);
    }
    out
}

#[test]
fn fires_in_deadline_then_schedule_order() {
    let mut q = TimerQueue::new();
    q.schedule_at(Millis(200), "c");
    q.schedule_at(Millis(100), "a");
    q.schedule_at(Millis(100), "b");
    assert_eq!(q.next_deadline(), Some(Millis(100)));
    assert_eq!(drain(&mut q, Millis(99)), Vec::<&str>::new());
    assert_eq!(drain(&mut q, Millis(150)), vec!["a", "b"]);
    assert_eq!(drain(&mut q, Millis(1_000)), vec!["c"]);
    assert!(q.is_empty());
}

#[test]
fn cancelled_tasks_never_fire() {
    let mut q = TimerQueue::new();
    let a = q.schedule_at(Millis(10), "a");
    q.schedule_at(Millis(20), "b");
    assert_eq!(q.cancel(a), Some("a"));
    assert_eq!(q.cancel(a), None);
    assert_eq!(q.pending(), 1);
    assert_eq!(q.next_deadline(), Some(Millis(20)));
    assert_eq!(drain(&mut q, Millis(100)), vec!["b"]);
}

#[test]
fn cancel_all_releases_everything() {
    let mut q = TimerQueue::new();
    for i in 0..5 {
        q.schedule_at(Millis(i * 10), "x");
    }
    assert_eq!(q.cancel_all(), 5);
    assert!(q.is_empty());
    assert_eq!(q.next_deadline(), None);
    assert_eq!(drain(&mut q, Millis(u64::MAX)), Vec::<&str>::new());
}

#[test]
fn pop_due_reports_deadline_and_id() {
    let mut q = TimerQueue::new();
    let id = q.schedule_at(Millis(42), "x");
    let (at, got, task) = q.pop_due(Millis(50)).unwrap();
    assert_eq!((at, got, task), (Millis(42), id, "x"));
}
