use std::fmt::Write as _;

/// One CSS transform function. Order within a [`StyleFrame`] is significant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum TransformOp {
    /// `perspective(<px>)`
    Perspective(f64),
    /// `translateX(<px>)`
    TranslateX(f64),
    /// `translateY(<px>)`
    TranslateY(f64),
    /// `rotateX(<deg>)`
    RotateX(f64),
    /// `rotate(<deg>)`
    Rotate(f64),
    /// `scale(<factor>)`
    Scale(f64),
}

impl TransformOp {
    fn write_css(self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Perspective(v) => write!(out, "perspective({}px)", fmt_num(v)),
            Self::TranslateX(v) => write!(out, "translateX({}px)", fmt_num(v)),
            Self::TranslateY(v) => write!(out, "translateY({}px)", fmt_num(v)),
            Self::RotateX(v) => write!(out, "rotateX({}deg)", fmt_num(v)),
            Self::Rotate(v) => write!(out, "rotate({}deg)", fmt_num(v)),
            Self::Scale(v) => write!(out, "scale({})", fmt_num(v)),
        };
    }
}

/// Opacity, transform and filter for one element in one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleFrame {
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Transform functions, applied left to right. Empty means `transform: none`.
    pub transform: Vec<TransformOp>,
    /// Gaussian blur radius in pixels; omitted when zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_px: Option<f64>,
}

impl StyleFrame {
    /// Fully visible, untransformed.
    pub fn identity() -> Self {
        Self {
            opacity: Some(1.0),
            transform: Vec::new(),
            blur_px: None,
        }
    }

    /// `transform` property value.
    pub fn transform_css(&self) -> String {
        if self.transform.is_empty() {
            return "none".to_owned();
        }
        let mut out = String::new();
        for (i, op) in self.transform.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            op.write_css(&mut out);
        }
        out
    }

    /// `filter` property value, if any.
    pub fn filter_css(&self) -> Option<String> {
        self.blur_px
            .filter(|b| *b > 0.0)
            .map(|b| format!("blur({}px)", fmt_num(b)))
    }

    /// Inline style declarations, e.g. `opacity: 0.5; transform: scale(0.9)`.
    pub fn to_css(&self) -> String {
        let mut decls = Vec::with_capacity(3);
        if let Some(o) = self.opacity {
            decls.push(format!("opacity: {}", fmt_num(o)));
        }
        decls.push(format!("transform: {}", self.transform_css()));
        if let Some(f) = self.filter_css() {
            decls.push(format!("filter: {f}"));
        }
        decls.join("; ")
    }
}

/// Format a CSS number with at most four decimals and no trailing zeros.
pub(crate) fn fmt_num(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/style.rs"]
mod tests;
