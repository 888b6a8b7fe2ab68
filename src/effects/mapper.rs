//! Geometry-to-style mapping.
//!
//! Every function here is pure: the same rect and viewport always yield the same
//! [`StyleFrame`], which is what lets a skipped animation frame self-correct on the next one.

use crate::effects::style::{StyleFrame, TransformOp};
use crate::foundation::core::{Rect, rect_center_y};
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use crate::foundation::math::{below_sign, finite_or};

/// Tuning knobs for the generic distance-based transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Opacity falloff per unit of normalized distance.
    pub fade_end: f64,
    /// Scale reached at (and floored beyond) normalized distance 1.
    pub scale_min: f64,
    /// `rotateX` in degrees at normalized distance 1.
    pub rotate_max: f64,
    /// `translateY` in pixels at normalized distance 1.
    pub translate_rate: f64,
    /// Blur radius in pixels at normalized distance 1. Zero disables the filter.
    pub blur_max: f64,
    /// Perspective depth in pixels prepended to the transform; `None` for a flat transform.
    pub perspective: Option<f64>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            fade_end: 1.2,
            scale_min: 0.85,
            rotate_max: 15.0,
            translate_rate: 30.0,
            blur_max: 0.0,
            perspective: Some(1000.0),
        }
    }
}

impl MapperConfig {
    /// Config with the four primary knobs set and the rest defaulted.
    pub fn new(fade_end: f64, scale_min: f64, rotate_max: f64, translate_rate: f64) -> Self {
        Self {
            fade_end,
            scale_min,
            rotate_max,
            translate_rate,
            ..Self::default()
        }
    }

    /// Headshot wrapper inside the hero.
    pub fn headshot() -> Self {
        Self::new(1.5, 0.7, 20.0, 50.0)
    }

    /// Page title.
    pub fn title() -> Self {
        Self::new(1.3, 0.9, 10.0, 20.0)
    }

    /// Subtitle under the title.
    pub fn subtitle() -> Self {
        Self::new(1.2, 0.92, 8.0, 15.0)
    }

    /// About / projects / connect sections.
    pub fn section() -> Self {
        Self::new(1.0, 0.9, 8.0, 25.0)
    }

    /// Check that every knob is usable.
    pub fn validate(&self) -> ScrollFxResult<()> {
        let knobs = [
            ("fade_end", self.fade_end),
            ("scale_min", self.scale_min),
            ("rotate_max", self.rotate_max),
            ("translate_rate", self.translate_rate),
            ("blur_max", self.blur_max),
        ];
        for (name, v) in knobs {
            if !v.is_finite() {
                return Err(ScrollFxError::validation(format!("{name} must be finite")));
            }
        }
        if self.fade_end < 0.0 {
            return Err(ScrollFxError::validation("fade_end must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.scale_min) {
            return Err(ScrollFxError::validation("scale_min must be in [0, 1]"));
        }
        if self.blur_max < 0.0 {
            return Err(ScrollFxError::validation("blur_max must be >= 0"));
        }
        if self.perspective.is_some_and(|p| !(p.is_finite() && p > 0.0)) {
            return Err(ScrollFxError::validation("perspective must be > 0"));
        }
        Ok(())
    }
}

/// Where an element sits relative to the optimal viewing line (half the viewport height).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDistance {
    /// `|center - optimal| / viewportHeight`, clamped to `[0, 1]`.
    pub normalized: f64,
    /// `+1` below the optimal line, `-1` at or above it.
    pub direction: f64,
}

impl ViewportDistance {
    /// Measure `rect` against a viewport of `viewport_height` pixels.
    ///
    /// A degenerate viewport (zero or negative height) reports the element as far away.
    pub fn measure(rect: Rect, viewport_height: f64) -> Self {
        let center = rect_center_y(rect);
        let optimal = viewport_height * 0.5;
        let direction = below_sign(center, optimal);
        if viewport_height <= 0.0 || !center.is_finite() {
            return Self {
                normalized: 1.0,
                direction,
            };
        }
        let normalized = ((center - optimal).abs() / viewport_height).min(1.0);
        Self {
            normalized,
            direction,
        }
    }
}

/// `max(1 - d * fade_end, 0)`, capped at 1.
pub fn fade_opacity(normalized: f64, fade_end: f64) -> f64 {
    (1.0 - normalized * fade_end).clamp(0.0, 1.0)
}

/// `max(1 - d * (1 - scale_min), scale_min)`.
pub fn shrink_scale(normalized: f64, scale_min: f64) -> f64 {
    (1.0 - normalized * (1.0 - scale_min)).max(scale_min)
}

/// Generic distance-based transform used for the headshot, title, subtitle and sections.
pub fn map_element(rect: Rect, viewport_height: f64, cfg: &MapperConfig) -> StyleFrame {
    let d = ViewportDistance::measure(rect, viewport_height);
    map_distance(d, cfg)
}

/// Same as [`map_element`] for an already measured distance.
pub fn map_distance(d: ViewportDistance, cfg: &MapperConfig) -> StyleFrame {
    let n = d.normalized;
    let scale_min = finite_or(cfg.scale_min, 1.0).clamp(0.0, 1.0);
    let opacity = fade_opacity(n, finite_or(cfg.fade_end, 0.0).max(0.0));
    let scale = shrink_scale(n, scale_min);
    let rotation = n * finite_or(cfg.rotate_max, 0.0) * d.direction;
    let translate_y = n * finite_or(cfg.translate_rate, 0.0) * d.direction;
    let blur = n * finite_or(cfg.blur_max, 0.0).max(0.0);

    let mut transform = Vec::with_capacity(4);
    if let Some(p) = cfg.perspective {
        transform.push(TransformOp::Perspective(p));
    }
    transform.push(TransformOp::TranslateY(translate_y));
    transform.push(TransformOp::RotateX(rotation));
    transform.push(TransformOp::Scale(scale));

    StyleFrame {
        opacity: Some(opacity),
        transform,
        blur_px: (blur > 0.0).then_some(blur),
    }
}

/// Hero pin: the hero is shown untouched while its top is near the viewport top.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeroPin {
    /// Half-width of the pin window as a fraction of viewport height.
    pub window_fraction: f64,
}

impl Default for HeroPin {
    fn default() -> Self {
        Self {
            window_fraction: 0.15,
        }
    }
}

impl HeroPin {
    /// `true` while the rect's top lies within `±window_fraction * viewportHeight`.
    pub fn is_pinned(&self, rect: Rect, viewport_height: f64) -> bool {
        let window = (self.window_fraction * viewport_height).abs();
        rect.y0.abs() <= window
    }
}

/// Hero transform: identity while `anchor` is pinned, generic mapping of `rect` otherwise.
pub fn map_hero(
    rect: Rect,
    anchor: Rect,
    viewport_height: f64,
    pin: &HeroPin,
    cfg: &MapperConfig,
) -> StyleFrame {
    if pin.is_pinned(anchor, viewport_height) {
        return StyleFrame::identity();
    }
    map_element(rect, viewport_height, cfg)
}

/// Knobs for list children that slide sideways by index parity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ListItemConfig {
    /// Opacity falloff per unit of normalized distance.
    pub fade_end: f64,
    /// Scale floor.
    pub scale_min: f64,
    /// Horizontal shift in pixels at normalized distance 1.
    pub shift: f64,
}

impl Default for ListItemConfig {
    fn default() -> Self {
        Self {
            fade_end: 1.2,
            scale_min: 0.85,
            shift: 20.0,
        }
    }
}

/// Project list child: even indices drift left, odd indices drift right.
pub fn map_list_item(
    rect: Rect,
    viewport_height: f64,
    index: usize,
    cfg: &ListItemConfig,
) -> StyleFrame {
    let n = ViewportDistance::measure(rect, viewport_height).normalized;
    let side = if index % 2 == 0 { -1.0 } else { 1.0 };
    StyleFrame {
        opacity: Some(fade_opacity(n, cfg.fade_end.max(0.0))),
        transform: vec![
            TransformOp::TranslateX(n * cfg.shift * side),
            TransformOp::Scale(shrink_scale(n, cfg.scale_min.clamp(0.0, 1.0))),
        ],
        blur_px: None,
    }
}

/// Fade and shrink only; used for the social icon row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeScaleConfig {
    /// Opacity falloff per unit of normalized distance.
    pub fade_end: f64,
    /// Scale floor.
    pub scale_min: f64,
}

impl Default for FadeScaleConfig {
    fn default() -> Self {
        Self {
            fade_end: 1.3,
            scale_min: 0.8,
        }
    }
}

/// Opacity and scale without rotation or translation.
pub fn map_fade_scale(rect: Rect, viewport_height: f64, cfg: &FadeScaleConfig) -> StyleFrame {
    let n = ViewportDistance::measure(rect, viewport_height).normalized;
    StyleFrame {
        opacity: Some(fade_opacity(n, cfg.fade_end.max(0.0))),
        transform: vec![TransformOp::Scale(shrink_scale(
            n,
            cfg.scale_min.clamp(0.0, 1.0),
        ))],
        blur_px: None,
    }
}

/// Background layer parallax, proportional to the raw scroll offset.
pub fn map_parallax(scroll_offset: f64, rate: f64) -> StyleFrame {
    StyleFrame {
        opacity: None,
        transform: vec![TransformOp::TranslateY(scroll_offset * rate)],
        blur_px: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mapper.rs"]
mod tests;
