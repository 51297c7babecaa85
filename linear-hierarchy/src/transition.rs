//! Timing of level transitions.
//!
//! A transition plays once. It completes when its duration has elapsed, or
//! immediately when it is finished early (blur, teardown, reduced motion).
//! Its completion hook is `FnOnce` and is consumed when the transition
//! completes, so it cannot fire twice.

use std::time::{Duration, Instant};

use serde::Deserialize;

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (constant speed)
    Linear,
    /// Ease in (slow start, fast end)
    EaseIn,
    /// Ease out (fast start, slow end)
    #[default]
    EaseOut,
    /// Ease in-out (slow start and end)
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Direction of a level transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Descend into the selected node's children.
    Expand,
    /// Ascend back to the parent level.
    Collapse,
}

/// Hook invoked once when a transition completes.
pub type Completion = Box<dyn FnOnce()>;

/// A transition in flight.
pub(crate) struct Transition {
    pub kind: TransitionKind,
    start: Instant,
    duration: Duration,
    easing: Easing,
    completion: Completion,
}

impl Transition {
    pub fn new(
        kind: TransitionKind,
        start: Instant,
        duration: Duration,
        easing: Easing,
        completion: Completion,
    ) -> Self {
        Self {
            kind,
            start,
            duration,
            easing,
            completion,
        }
    }

    /// Raw progress (0.0 to 1.0) at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress at `now`.
    pub fn eased_progress(&self, now: Instant) -> f32 {
        self.easing.apply(self.progress(now))
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn completion_time(&self) -> Instant {
        self.start + self.duration
    }

    /// Consume the transition, firing its hook.
    pub fn complete(self) -> TransitionKind {
        (self.completion)();
        self.kind
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("kind", &self.kind)
            .field("start", &self.start)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}
