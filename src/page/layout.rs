use crate::foundation::core::{ElementId, Rect, ScrollMetrics, rect_from_top};
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use std::collections::BTreeMap;

/// Viewport-relative element geometry for one frame.
///
/// Elements absent from `rects` are treated as not mounted and skipped.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// Bounding rects keyed by element id.
    pub rects: BTreeMap<ElementId, Rect>,
}

impl Geometry {
    /// Empty geometry for a viewport.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            rects: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, id: impl Into<ElementId>, rect: Rect) -> Self {
        self.rects.insert(id.into(), rect);
        self
    }

    /// Rect of `id`, if mounted.
    pub fn rect(&self, id: &ElementId) -> Option<Rect> {
        self.rects.get(id).copied()
    }
}

/// One block of a static layout, in document coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockDef {
    /// Element id.
    pub id: ElementId,
    /// Distance from the document top.
    pub top: f64,
    /// Block height.
    pub height: f64,
    /// Fixed-position blocks ignore the scroll offset.
    #[serde(default)]
    pub fixed: bool,
}

/// Document layout that does not reflow while scrolling.
///
/// Stands in for a browser when replaying scroll traces: the viewport-relative rect of every
/// block at offset `s` is its document rect shifted up by `s`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaticLayout {
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// Total document height; defaults to the lowest block bottom.
    #[serde(default)]
    pub document_height: Option<f64>,
    /// Blocks in any order.
    pub blocks: Vec<BlockDef>,
}

impl StaticLayout {
    /// Validate sizes.
    pub fn validate(&self) -> ScrollFxResult<()> {
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            return Err(ScrollFxError::geometry("viewport_height must be > 0"));
        }
        if let Some(h) = self.document_height.filter(|h| !(h.is_finite() && *h >= 0.0)) {
            return Err(ScrollFxError::geometry(format!(
                "document_height must be >= 0, got {h}"
            )));
        }
        for b in &self.blocks {
            if !(b.top.is_finite() && b.height.is_finite() && b.height >= 0.0) {
                return Err(ScrollFxError::geometry(format!(
                    "block '{}' has invalid top/height",
                    b.id
                )));
            }
        }
        Ok(())
    }

    /// Total scrollable height.
    pub fn scroll_height(&self) -> f64 {
        self.document_height.unwrap_or_else(|| {
            self.blocks
                .iter()
                .filter(|b| !b.fixed)
                .map(|b| b.top + b.height)
                .fold(0.0, f64::max)
        })
    }

    /// Largest reachable offset.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.viewport_height).max(0.0)
    }

    /// Scroll metrics at `offset` (clamped to the scrollable range).
    pub fn metrics_at(&self, offset: f64) -> ScrollFxResult<ScrollMetrics> {
        let offset = offset.clamp(0.0, self.max_scroll());
        ScrollMetrics::new(offset, self.scroll_height(), self.viewport_height)
    }

    /// Viewport-relative rects at `offset`.
    pub fn geometry_at(&self, offset: f64) -> Geometry {
        let offset = offset.clamp(0.0, self.max_scroll());
        let rects = self
            .blocks
            .iter()
            .map(|b| {
                let top = if b.fixed { b.top } else { b.top - offset };
                (b.id.clone(), rect_from_top(top, b.height))
            })
            .collect();
        Geometry {
            viewport_height: self.viewport_height,
            rects,
        }
    }

    /// Layout matching [`crate::PageDef::portfolio`] at the given viewport height.
    pub fn portfolio(viewport_height: f64) -> Self {
        let vh = viewport_height;
        let mut blocks = Vec::new();
        let mut push = |id: &str, top: f64, height: f64, fixed: bool| {
            blocks.push(BlockDef {
                id: ElementId::from(id),
                top,
                height,
                fixed,
            });
        };
        push("background", 0.0, vh, true);
        push("hero", 0.0, vh, false);
        push("headshot", vh * 0.12, 240.0, false);
        push("headshot-image", vh * 0.12, 240.0, false);
        push("headshot-placeholder", vh * 0.12, 240.0, false);
        push("title", vh * 0.12 + 280.0, 60.0, false);
        push("subtitle", vh * 0.12 + 350.0, 40.0, false);
        push("about", vh, 500.0, false);
        let projects_top = vh + 600.0;
        push("projects", projects_top, 700.0, false);
        push("project-list", projects_top + 100.0, 560.0, false);
        for (i, p) in ["lease-ai", "studi", "gp", "summarizer", "jadn"]
            .iter()
            .enumerate()
        {
            let id = format!("project-{p}");
            push(id.as_str(), projects_top + 100.0 + i as f64 * 112.0, 96.0, false);
        }
        let connect_top = projects_top + 800.0;
        push("connect", connect_top, 400.0, false);
        push("socials", connect_top + 200.0, 64.0, false);
        Self {
            viewport_height: vh,
            document_height: Some(connect_top + 400.0 + vh * 0.5),
            blocks,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/layout.rs"]
mod tests;
