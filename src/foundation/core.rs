use crate::foundation::error::{ScrollFxError, ScrollFxResult};

pub use kurbo::Rect;

/// Host clock reading in whole milliseconds.
///
/// The engine never reads a clock itself; every time-dependent entry point receives the current
/// reading from the host so that replays are deterministic.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Return `self + ms` using saturating arithmetic.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero when `earlier` is in the future).
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Stable identifier of a rendered element (the DOM id or ref name on the host side).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw scroll geometry sampled from the host on a scroll event.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset in pixels.
    pub offset: f64,
    /// Total scrollable document height in pixels.
    pub scroll_height: f64,
    /// Visible viewport height in pixels.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Create validated metrics. All values must be finite and heights non-negative.
    pub fn new(offset: f64, scroll_height: f64, viewport_height: f64) -> ScrollFxResult<Self> {
        if !(offset.is_finite() && scroll_height.is_finite() && viewport_height.is_finite()) {
            return Err(ScrollFxError::geometry("scroll metrics must be finite"));
        }
        if scroll_height < 0.0 || viewport_height < 0.0 {
            return Err(ScrollFxError::geometry(
                "scroll metrics heights must be non-negative",
            ));
        }
        Ok(Self {
            offset,
            scroll_height,
            viewport_height,
        })
    }

    /// Maximum reachable scroll offset. Zero when content fits in the viewport.
    pub fn max_scroll(self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }
}

/// Build a viewport-relative element rect from its top edge and height.
///
/// Horizontal extent is irrelevant to every effect, so rects span `[0, 0]` on x.
pub fn rect_from_top(top: f64, height: f64) -> Rect {
    Rect::new(0.0, top, 0.0, top + height.max(0.0))
}

/// Vertical center of a viewport-relative rect.
pub fn rect_center_y(rect: Rect) -> f64 {
    rect.y0 + rect.height() / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
