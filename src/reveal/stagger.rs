use crate::foundation::core::Millis;
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use crate::foundation::math::{Rng64, stable_hash64};

/// Cascade settings for revealing a container's children one after another.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    /// Delay between consecutive children, in milliseconds.
    pub interval_ms: u64,
    /// Attach a small decorative rotation/scale jitter to each child.
    pub jitter: bool,
    /// Seed for the jitter generator.
    pub seed: u64,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            jitter: true,
            seed: 0,
        }
    }
}

impl StaggerConfig {
    /// Validate the interval.
    pub fn validate(&self) -> ScrollFxResult<()> {
        if self.interval_ms == 0 {
            return Err(ScrollFxError::validation("stagger interval_ms must be > 0"));
        }
        Ok(())
    }

    /// Reveal time of child `index` for a container revealed at `trigger`.
    pub fn reveal_at(&self, trigger: Millis, index: usize) -> Millis {
        let delay = self.interval_ms.saturating_mul(index as u64);
        trigger.after(delay)
    }
}

/// Decorative per-child jitter exported as CSS custom properties.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Jitter {
    /// Rotation in degrees, in `[-1, 1)`.
    pub rotation_deg: f64,
    /// Scale factor, in `[0.98, 1.02)`.
    pub scale: f64,
}

impl Jitter {
    /// Deterministic jitter for one child of `container`.
    pub fn for_child(seed: u64, container: &str, index: usize) -> Self {
        let mut rng = Rng64::new(stable_hash64(seed, container) ^ (index as u64));
        let rotation_deg = (rng.next_f64_01() - 0.5) * 2.0;
        let scale = 0.98 + rng.next_f64_01() * 0.04;
        Self {
            rotation_deg,
            scale,
        }
    }
}

/// One scheduled child reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerStep {
    /// Child position within the container.
    pub index: usize,
    /// When the child should be revealed.
    pub at: Millis,
    /// Decorative jitter, when enabled.
    pub jitter: Option<Jitter>,
}

/// Plan the cascade for `count` children of `container`, in ascending index order.
pub fn plan_stagger(
    cfg: &StaggerConfig,
    container: &str,
    count: usize,
    trigger: Millis,
) -> Vec<StaggerStep> {
    (0..count)
        .map(|index| StaggerStep {
            index,
            at: cfg.reveal_at(trigger, index),
            jitter: cfg
                .jitter
                .then(|| Jitter::for_child(cfg.seed, container, index)),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/stagger.rs"]
mod tests;
