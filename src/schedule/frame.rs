/// Depth-one frame request queue.
///
/// However many scroll events arrive between two rendered frames, at most one recomputation is
/// pending at a time. The host schedules its animation-frame callback only when
/// [`FrameGate::request`] returns `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameGate {
    pending: bool,
    requested: u64,
    coalesced: u64,
}

impl FrameGate {
    /// Create an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame. Returns `true` only on the idle -> pending transition.
    pub fn request(&mut self) -> bool {
        if self.pending {
            self.coalesced = self.coalesced.saturating_add(1);
            return false;
        }
        self.pending = true;
        self.requested = self.requested.saturating_add(1);
        true
    }

    /// Consume the pending request at the start of a frame callback.
    ///
    /// Returns `false` when no frame was requested, in which case the callback must do nothing.
    pub fn begin_frame(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    /// Return `true` while a frame is scheduled but has not run.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Frames actually scheduled so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Requests folded into an already pending frame.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/frame.rs"]
mod tests;
