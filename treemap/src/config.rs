//! Map session configuration loaded via OrthoConfig.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::RenderSurface;
use crate::domain::{DEFAULT_ZOOM_THRESHOLD, MapSession};

/// Seconds between live position polls unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Settings fixed at startup for one map session.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TREEMAP")]
pub struct MapSettings {
    /// Zoom level at or above which tree labels are shown.
    pub zoom_threshold: Option<u8>,
    /// Seconds between live position polls.
    pub poll_interval_secs: Option<u64>,
    /// Whether live position polling starts enabled.
    pub auto_refresh: Option<bool>,
}

impl MapSettings {
    /// Return the configured zoom threshold, falling back to the default.
    #[must_use]
    pub fn zoom_threshold(&self) -> u8 {
        self.zoom_threshold.unwrap_or(DEFAULT_ZOOM_THRESHOLD)
    }

    /// Return the poll interval. Zero is raised to one second.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        let secs = self
            .poll_interval_secs
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Return whether polling starts enabled. Defaults to on.
    #[must_use]
    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh.unwrap_or(true)
    }

    /// Build a session over `surface` using these settings.
    #[must_use]
    pub fn session<S: RenderSurface>(&self, surface: S, clock: Arc<dyn Clock>) -> MapSession<S> {
        MapSession::new(surface, clock)
            .with_zoom_threshold(self.zoom_threshold())
            .with_auto_refresh(self.auto_refresh())
    }
}
