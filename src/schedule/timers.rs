use crate::foundation::core::Millis;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Handle for a scheduled task; used to cancel it before it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Cancellable delayed tasks on the host's millisecond clock.
///
/// Determinism rule: tasks due at the same deadline fire in scheduling order (smallest
/// `TimerId` first). Cancelled tasks are dropped lazily when they reach the head of the heap.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    heap: BinaryHeap<Reverse<(Millis, u64)>>,
    live: BTreeMap<u64, T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            heap: BinaryHeap::new(),
            live: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire at `deadline`.
    pub fn schedule_at(&mut self, deadline: Millis, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.heap.push(Reverse((deadline, id)));
        self.live.insert(id, task);
        TimerId(id)
    }

    /// Cancel a pending task. Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.live.remove(&id.0)
    }

    /// Release every pending task.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        self.heap.clear();
        n
    }

    /// Number of tasks still pending.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Earliest live deadline, if any.
    pub fn next_deadline(&mut self) -> Option<Millis> {
        self.discard_cancelled_head();
        self.heap.peek().map(|Reverse((at, _))| *at)
    }

    /// Pop the next task due at or before `now`.
    ///
    /// Callers loop on this rather than draining a batch so that tasks scheduled by a firing
    /// task with a deadline `<= now` still run within the same tick.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, TimerId, T)> {
        loop {
            let Reverse((at, id)) = *self.heap.peek()?;
            if at > now {
                return None;
            }
            self.heap.pop();
            if let Some(task) = self.live.remove(&id) {
                return Some((at, TimerId(id), task));
            }
        }
    }

    fn discard_cancelled_head(&mut self) {
        while let Some(Reverse((_, id))) = self.heap.peek() {
            if self.live.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timers.rs"]
mod tests;
