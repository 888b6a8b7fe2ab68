use crate::foundation::core::{Rect, rect_center_y};

/// Index into the page's ordered section list, or none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActiveSection(pub Option<usize>);

impl ActiveSection {
    /// No section is active.
    pub const NONE: Self = Self(None);

    /// Signed index used by the nav indicator: `-1` for none.
    pub fn as_signed(self) -> i64 {
        match self.0 {
            Some(i) => i as i64,
            None => -1,
        }
    }
}

/// Pick the section closest to the viewport center.
///
/// `sections` is in declaration order and `None` marks a section that is not mounted. Only
/// sections that overlap the viewport are candidates; ties keep the lower index.
pub fn active_section(sections: &[Option<Rect>], viewport_height: f64) -> ActiveSection {
    let center = viewport_height * 0.5;
    let mut best: Option<(usize, f64)> = None;
    for (i, rect) in sections.iter().enumerate() {
        let Some(rect) = rect else {
            continue;
        };
        let overlaps = rect.y1 > 0.0 && rect.y0 < viewport_height;
        let point_inside = rect.height() == 0.0 && (0.0..=viewport_height).contains(&rect.y0);
        if !(overlaps || point_inside) {
            continue;
        }
        let dist = (rect_center_y(*rect) - center).abs();
        match best {
            Some((_, d)) if d <= dist => {}
            _ => best = Some((i, dist)),
        }
    }
    ActiveSection(best.map(|(i, _)| i))
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/section.rs"]
mod tests;
