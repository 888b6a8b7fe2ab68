use crate::foundation::core::ScrollMetrics;

/// Derived per-event scroll state.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Scroll offset in pixels, as reported by the host.
    pub offset: f64,
    /// Maximum reachable offset (`scrollHeight - viewportHeight`, floored at zero).
    pub max_scroll: f64,
    /// `offset / max_scroll` clamped to `[0, 1]`; zero when nothing can scroll.
    pub progress: f64,
    /// Offset delta since the previous sample; zero on the first sample.
    pub velocity: f64,
}

impl ScrollState {
    /// Width of the progress indicator bar, in percent.
    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }
}

/// Scroll progress over the scrollable range, clamped to `[0, 1]`.
///
/// Content shorter than the viewport has progress zero; overscroll in either direction clamps.
pub fn scroll_progress(metrics: ScrollMetrics) -> f64 {
    let max = metrics.max_scroll();
    if max <= 0.0 {
        return 0.0;
    }
    (metrics.offset / max).clamp(0.0, 1.0)
}

/// Samples scroll metrics and keeps the previous offset for velocity.
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    last_offset: Option<f64>,
    state: ScrollState,
}

impl ScrollTracker {
    /// Create a tracker with no samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll event and return the derived state.
    pub fn sample(&mut self, metrics: ScrollMetrics) -> ScrollState {
        let velocity = self
            .last_offset
            .map(|prev| metrics.offset - prev)
            .unwrap_or(0.0);
        self.last_offset = Some(metrics.offset);
        self.state = ScrollState {
            offset: metrics.offset,
            max_scroll: metrics.max_scroll(),
            progress: scroll_progress(metrics),
            velocity,
        };
        self.state
    }

    /// Latest derived state (all zeros before the first sample).
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Forget all samples.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
