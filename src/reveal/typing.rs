use crate::foundation::error::{ScrollFxError, ScrollFxResult};

/// Title typing settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Full title text.
    pub text: String,
    /// Delay between mount and the first character.
    pub initial_delay_ms: u64,
    /// Delay between characters.
    pub interval_ms: u64,
    /// How long the cursor stays after the last character.
    pub cursor_linger_ms: u64,
    /// CSS `border-right` used as the cursor decoration.
    pub cursor_border: String,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            text: "hi, i'm jadon leung".to_owned(),
            initial_delay_ms: 500,
            interval_ms: 80,
            cursor_linger_ms: 1000,
            cursor_border: "3px solid white".to_owned(),
        }
    }
}

impl TypingConfig {
    /// Validate timings.
    pub fn validate(&self) -> ScrollFxResult<()> {
        if self.interval_ms == 0 {
            return Err(ScrollFxError::validation("typing interval_ms must be > 0"));
        }
        Ok(())
    }
}

/// One-shot guard for the typing effect.
///
/// `start` can be claimed once; `typed` flips false -> true once, on completion, and never resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypedOnce {
    started: bool,
    typed: bool,
}

impl TypedOnce {
    /// Claim the right to start typing. Returns `false` on every call after the first.
    pub fn claim(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    /// Record completion.
    pub fn finish(&mut self) {
        self.typed = true;
    }

    /// `true` once the full text has been typed.
    pub fn is_typed(&self) -> bool {
        self.typed
    }
}

/// Timer-driven steps of the typing effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingStep {
    /// Initial delay elapsed: clear the title and show the cursor.
    Begin,
    /// Reveal the next character.
    NextChar,
    /// Linger elapsed: drop the cursor decoration.
    RemoveCursor,
}

/// Visible effect of a step, applied to the title element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingOutput {
    /// Replace the title text.
    Text(String),
    /// Set the `border-right` cursor decoration (`none` removes it).
    Cursor(String),
}

/// Outputs of one step plus the follow-up step to schedule, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Writes for the title element, in order.
    pub outputs: Vec<TypingOutput>,
    /// `(delay_ms, step)` to schedule next.
    pub next: Option<(u64, TypingStep)>,
}

/// Character-by-character title typer.
#[derive(Clone, Debug)]
pub struct TypeWriter {
    cfg: TypingConfig,
    // Byte offsets of every character boundary after the first, plus the end.
    boundaries: Vec<usize>,
    shown: usize,
}

impl TypeWriter {
    /// Create a typer for `cfg.text`.
    pub fn new(cfg: TypingConfig) -> Self {
        let boundaries = cfg
            .text
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(cfg.text.len()))
            .filter(|_| !cfg.text.is_empty())
            .collect();
        Self {
            cfg,
            boundaries,
            shown: 0,
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &TypingConfig {
        &self.cfg
    }

    /// Number of characters currently visible.
    pub fn shown_chars(&self) -> usize {
        self.shown
    }

    /// Currently visible prefix.
    pub fn visible_text(&self) -> &str {
        match self.shown {
            0 => "",
            n => &self.cfg.text[..self.boundaries[n - 1]],
        }
    }

    /// Delay and step that kick the effect off; schedule this at mount when the guard allows it.
    pub fn first_step(&self) -> (u64, TypingStep) {
        (self.cfg.initial_delay_ms, TypingStep::Begin)
    }

    /// Run one step and return its writes and follow-up.
    pub fn step(&mut self, step: TypingStep, guard: &mut TypedOnce) -> StepResult {
        match step {
            TypingStep::Begin => {
                self.shown = 0;
                StepResult {
                    outputs: vec![
                        TypingOutput::Text(String::new()),
                        TypingOutput::Cursor(self.cfg.cursor_border.clone()),
                    ],
                    next: Some((self.cfg.interval_ms, TypingStep::NextChar)),
                }
            }
            TypingStep::NextChar => {
                if self.shown < self.boundaries.len() {
                    self.shown += 1;
                    StepResult {
                        outputs: vec![TypingOutput::Text(self.visible_text().to_owned())],
                        next: Some((self.cfg.interval_ms, TypingStep::NextChar)),
                    }
                } else {
                    guard.finish();
                    tracing::debug!(chars = self.shown, "title typed");
                    StepResult {
                        outputs: Vec::new(),
                        next: Some((self.cfg.cursor_linger_ms, TypingStep::RemoveCursor)),
                    }
                }
            }
            TypingStep::RemoveCursor => StepResult {
                outputs: vec![TypingOutput::Cursor("none".to_owned())],
                next: None,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/typing.rs"]
mod tests;
