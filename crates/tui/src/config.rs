use std::fs;

use serde::Deserialize;
use swipecon_core::SwipeThresholds;
use tracing::{info, warn};

/// UI keys of the shared `config.toml`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Minimum horizontal drag, in terminal cells, for a swipe.
    pub swipe_distance: f32,
    /// Minimum drag speed, in cells per millisecond, for a swipe.
    pub swipe_velocity: f32,
    pub persist_history: bool,
    pub offline: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        let t = SwipeThresholds::default();
        Self {
            swipe_distance: t.distance,
            swipe_velocity: t.velocity,
            persist_history: false,
            offline: false,
        }
    }
}

impl UiConfig {
    /// Read the config file, falling back to defaults when it is missing or
    /// broken.
    pub fn load() -> Self {
        let Some(path) = bridges::http::config::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => {
                warn!(target: "tui", "read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_toml(&text) {
            Ok(cfg) => {
                info!(target: "tui", "loaded ui config from {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(target: "tui", "ignoring unparsable {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn thresholds(&self) -> SwipeThresholds {
        SwipeThresholds::new(self.swipe_distance.max(0.0), self.swipe_velocity.max(0.0))
    }
}
