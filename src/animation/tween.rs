use crate::animation::ease::Ease;
use crate::foundation::core::Millis;

/// Time-based scalar tween from `from` to `to` over `duration_ms`.
///
/// Sampling is stateless: any `now` maps to one value, so a skipped frame simply lands further
/// along the curve on the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Millis,
    duration_ms: u64,
    ease: Ease,
}

impl Tween {
    /// Start a tween at `start`. Zero durations are bumped to 1 ms.
    pub fn new(from: f64, to: f64, start: Millis, duration_ms: u64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration_ms: duration_ms.max(1),
            ease,
        }
    }

    /// Final value.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Normalized linear progress at `now`.
    pub fn progress(&self, now: Millis) -> f64 {
        let elapsed = now.since(self.start);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Eased value at `now`.
    pub fn sample(&self, now: Millis) -> f64 {
        self.ease.lerp(self.from, self.to, self.progress(now))
    }

    /// `true` once `now` is at or past the end of the tween.
    pub fn is_done(&self, now: Millis) -> bool {
        now.since(self.start) >= self.duration_ms
    }

    /// Restart towards `new_to` from wherever the tween currently is.
    pub fn retarget(&mut self, now: Millis, new_to: f64, duration_ms: u64) {
        let cur = self.sample(now);
        *self = Self::new(cur, new_to, now, duration_ms, self.ease);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
