//! Navigator configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;
use crate::theme::Theme;
use crate::transition::Easing;

/// Behaviour and appearance of a [`HierarchyController`](crate::HierarchyController).
///
/// Every field has a default, so a JSON configuration only needs the keys it
/// changes:
///
/// ```json
/// { "transition_ms": 150, "theme": { "active_color": "#ff8800" } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Length of the expand/collapse transition in milliseconds.
    pub transition_ms: u64,

    pub easing: Easing,

    /// If true, transitions complete instantly and their hooks fire
    /// before the expand/collapse call returns.
    pub reduced_motion: bool,

    /// Whether dynamic nodes may be inserted at the root level.
    /// Deeper levels follow their parent node's `editable` flag.
    pub root_editable: bool,

    pub theme: Theme,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            transition_ms: 250,
            easing: Easing::EaseOut,
            reduced_motion: false,
            root_editable: true,
            theme: Theme::default(),
        }
    }
}

impl NavigatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Set the transition length.
    pub fn transition(mut self, duration: Duration) -> Self {
        self.transition_ms = duration.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Enable or disable reduced motion.
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    pub fn root_editable(mut self, editable: bool) -> Self {
        self.root_editable = editable;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// True when transitions skip their animation.
    pub fn is_instant(&self) -> bool {
        self.reduced_motion || self.transition_ms == 0
    }
}
