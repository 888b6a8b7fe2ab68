use crate::effects::style::{StyleFrame, TransformOp};
use crate::foundation::core::{ElementId, Rect};
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use std::collections::BTreeMap;

/// Vertical root margin as fractions of viewport height. Negative values shrink the root.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RootMargin {
    /// Margin applied to the top edge.
    pub top: f64,
    /// Margin applied to the bottom edge.
    pub bottom: f64,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: -0.1,
            bottom: -0.1,
        }
    }
}

impl RootMargin {
    /// Effective `[top, bottom]` band of the viewport after applying the margin.
    pub fn band(&self, viewport_height: f64) -> (f64, f64) {
        let top = -self.top * viewport_height;
        let bottom = viewport_height + self.bottom * viewport_height;
        (top, bottom)
    }
}

/// Observer options: notification thresholds, root margin and the reveal trigger.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Ascending ratios in `[0, 1]`; a notification fires whenever the ratio crosses one.
    pub thresholds: Vec<f64>,
    /// Root margin.
    pub root_margin: RootMargin,
    /// Minimum ratio (while intersecting) that reveals an element.
    pub reveal_ratio: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            thresholds: vec![0.0, 0.1, 0.3, 0.5, 0.7, 1.0],
            root_margin: RootMargin::default(),
            reveal_ratio: 0.0,
        }
    }
}

impl ObserverOptions {
    /// Validate thresholds and margins.
    pub fn validate(&self) -> ScrollFxResult<()> {
        if self.thresholds.is_empty() {
            return Err(ScrollFxError::validation(
                "observer needs at least one threshold",
            ));
        }
        for w in self.thresholds.windows(2) {
            if w[0] >= w[1] {
                return Err(ScrollFxError::validation(
                    "observer thresholds must be strictly ascending",
                ));
            }
        }
        if self
            .thresholds
            .iter()
            .any(|t| !(t.is_finite() && (0.0..=1.0).contains(t)))
        {
            return Err(ScrollFxError::validation(
                "observer thresholds must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal_ratio) {
            return Err(ScrollFxError::validation("reveal_ratio must be in [0, 1]"));
        }
        if !(self.root_margin.top.is_finite() && self.root_margin.bottom.is_finite()) {
            return Err(ScrollFxError::validation("root margin must be finite"));
        }
        Ok(())
    }
}

/// Result of intersecting one element with the (margin-adjusted) viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Any part of the element lies inside the root band (edge contact counts).
    pub is_intersecting: bool,
    /// Visible fraction of the element's height, in `[0, 1]`.
    pub ratio: f64,
}

/// Intersect `rect` with the viewport band defined by `margin`.
///
/// Zero-height elements are treated as points: ratio 1 when inside the band, 0 otherwise.
pub fn intersect(rect: Rect, viewport_height: f64, margin: &RootMargin) -> Intersection {
    let (band_top, band_bottom) = margin.band(viewport_height);
    let h = rect.height();
    if h <= 0.0 {
        let inside = rect.y0 >= band_top && rect.y0 <= band_bottom;
        return Intersection {
            is_intersecting: inside,
            ratio: if inside { 1.0 } else { 0.0 },
        };
    }
    let visible = (rect.y1.min(band_bottom) - rect.y0.max(band_top)).max(0.0);
    let touching = rect.y1 >= band_top && rect.y0 <= band_bottom;
    Intersection {
        is_intersecting: touching,
        ratio: (visible / h).clamp(0.0, 1.0),
    }
}

/// One-directional reveal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RevealState {
    /// Not yet seen.
    #[default]
    Unrevealed,
    /// Seen at least once. Terminal.
    Revealed,
}

/// Notification delivered for an observed element when its ratio crosses a threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    /// Element the notification is about.
    pub id: ElementId,
    /// Current intersection.
    pub intersection: Intersection,
    /// `true` exactly once: on the notification that performed the reveal.
    pub revealed_now: bool,
}

#[derive(Clone, Debug)]
struct Observed {
    state: RevealState,
    // `None` until the first measurement, so the first one always notifies.
    bucket: Option<usize>,
}

/// Threshold-crossing observer with one-shot reveal per element.
#[derive(Clone, Debug)]
pub struct RevealObserver {
    opts: ObserverOptions,
    entries: BTreeMap<ElementId, Observed>,
    connected: bool,
}

impl RevealObserver {
    /// Create a connected observer with no targets.
    pub fn new(opts: ObserverOptions) -> Self {
        Self {
            opts,
            entries: BTreeMap::new(),
            connected: true,
        }
    }

    /// Options in use.
    pub fn options(&self) -> &ObserverOptions {
        &self.opts
    }

    /// Start observing `id`. Observing an already observed id keeps its state.
    pub fn observe(&mut self, id: ElementId) {
        self.entries.entry(id).or_insert(Observed {
            state: RevealState::Unrevealed,
            bucket: None,
        });
    }

    /// Stop observing `id`.
    pub fn unobserve(&mut self, id: &ElementId) {
        self.entries.remove(id);
    }

    /// Drop every target; later measurements are ignored.
    pub fn disconnect(&mut self) {
        self.entries.clear();
        self.connected = false;
    }

    /// Reveal state of `id`, if observed.
    pub fn state(&self, id: &ElementId) -> Option<RevealState> {
        self.entries.get(id).map(|e| e.state)
    }

    /// Number of observed targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is observed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Feed a fresh measurement for `id`.
    ///
    /// Returns a notification only when the ratio moved into a different threshold bucket (or on
    /// the first measurement). Unobserved ids and a disconnected observer yield `None`.
    pub fn measure(
        &mut self,
        id: &ElementId,
        rect: Rect,
        viewport_height: f64,
    ) -> Option<Notification> {
        if !self.connected {
            return None;
        }
        let hit = intersect(rect, viewport_height, &self.opts.root_margin);
        let bucket = threshold_bucket(&self.opts.thresholds, hit);
        let entry = self.entries.get_mut(id)?;
        if entry.bucket == Some(bucket) {
            return None;
        }
        entry.bucket = Some(bucket);

        let mut revealed_now = false;
        if entry.state == RevealState::Unrevealed
            && hit.is_intersecting
            && hit.ratio >= self.opts.reveal_ratio
        {
            entry.state = RevealState::Revealed;
            revealed_now = true;
            tracing::debug!(element = %id, ratio = hit.ratio, "revealed");
        }
        Some(Notification {
            id: id.clone(),
            intersection: hit,
            revealed_now,
        })
    }
}

// Number of thresholds the intersection has reached. Threshold 0 counts as reached only while
// intersecting, so that "touching at the edge" and "fully outside" land in different buckets.
fn threshold_bucket(thresholds: &[f64], hit: Intersection) -> usize {
    thresholds
        .iter()
        .filter(|&&t| {
            if t == 0.0 {
                hit.is_intersecting
            } else {
                hit.ratio >= t
            }
        })
        .count()
}

/// Entry styling driven by the intersection ratio:
/// `translateY((1 - r) * 50px) scale(0.9 + r * 0.1)` at opacity `r`.
pub fn ratio_style(ratio: f64) -> StyleFrame {
    let r = ratio.clamp(0.0, 1.0);
    StyleFrame {
        opacity: Some(r),
        transform: vec![
            TransformOp::TranslateY((1.0 - r) * 50.0),
            TransformOp::Scale(0.9 + r * 0.1),
        ],
        blur_px: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/observer.rs"]
mod tests;
