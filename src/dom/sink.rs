use crate::effects::style::StyleFrame;
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use std::io::Write;

/// One mutation the host applies to its rendered page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomWrite {
    /// Replace the element's opacity/transform/filter.
    Style {
        /// Target element.
        target: ElementId,
        /// New style.
        style: StyleFrame,
    },
    /// Replace the element's text content.
    Text {
        /// Target element.
        target: ElementId,
        /// New text.
        text: String,
    },
    /// Set one inline style property or CSS custom property.
    Property {
        /// Target element.
        target: ElementId,
        /// Property name, e.g. `display` or `--random-scale`.
        name: String,
        /// Property value.
        value: String,
    },
    /// Add a class.
    AddClass {
        /// Target element.
        target: ElementId,
        /// Class name.
        class: String,
    },
    /// Remove a class.
    RemoveClass {
        /// Target element.
        target: ElementId,
        /// Class name.
        class: String,
    },
    /// Width of the scroll progress bar, in percent.
    ProgressBar {
        /// `progress * 100`.
        percent: f64,
    },
    /// Index highlighted by the navigation indicator; `-1` for none.
    NavIndicator {
        /// Active section index.
        index: i64,
    },
}

impl DomWrite {
    /// Element targeted by this write, if it targets one.
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Self::Style { target, .. }
            | Self::Text { target, .. }
            | Self::Property { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. } => Some(target),
            Self::ProgressBar { .. } | Self::NavIndicator { .. } => None,
        }
    }
}

/// Sink contract for consuming DOM writes.
///
/// Ordering contract: writes arrive in the order the engine produced them; within one frame,
/// tracked elements appear in declaration order.
pub trait DomSink {
    /// Apply (or record) one write.
    fn write(&mut self, w: DomWrite) -> ScrollFxResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryDomSink {
    writes: Vec<DomWrite>,
}

impl InMemoryDomSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow every captured write, in order.
    pub fn writes(&self) -> &[DomWrite] {
        &self.writes
    }

    /// Writes targeting `id`, in order.
    pub fn writes_for<'a>(&'a self, id: &'a ElementId) -> impl Iterator<Item = &'a DomWrite> + 'a {
        self.writes.iter().filter(move |w| w.target() == Some(id))
    }

    /// Take the captured writes, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<DomWrite> {
        std::mem::take(&mut self.writes)
    }
}

impl DomSink for InMemoryDomSink {
    fn write(&mut self, w: DomWrite) -> ScrollFxResult<()> {
        self.writes.push(w);
        Ok(())
    }
}

/// Sink that serializes each write as one JSON line.
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of lines written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the writer.
    pub fn finish(mut self) -> ScrollFxResult<W> {
        self.out
            .flush()
            .map_err(|e| ScrollFxError::sink(format!("flush json lines: {e}")))?;
        Ok(self.out)
    }
}

impl<W: Write> DomSink for JsonLinesSink<W> {
    fn write(&mut self, w: DomWrite) -> ScrollFxResult<()> {
        serde_json::to_writer(&mut self.out, &w)
            .map_err(|e| ScrollFxError::serde(format!("encode dom write: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| ScrollFxError::sink(format!("write json line: {e}")))?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/sink.rs"]
mod tests;
