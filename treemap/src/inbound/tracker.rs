//! Periodic live-position polling.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::debug;

use crate::domain::GeoPoint;
use crate::domain::MapSession;
use crate::domain::ports::{PositionError, PositionSource, RenderSurface};

/// A position request that has been issued but not yet answered.
pub type PendingPosition<'a> =
    Pin<Box<dyn Future<Output = Result<GeoPoint, PositionError>> + Send + 'a>>;

/// Issues one position request per tick while auto-refresh is on.
///
/// The auto-refresh flag gates issuing a request only. An answer is always
/// applied, even if the flag was cleared while the request was in flight.
pub struct PositionTracker<P: ?Sized> {
    source: Arc<P>,
    period: Duration,
}

impl<P: PositionSource + ?Sized> PositionTracker<P> {
    #[must_use]
    pub fn new(source: Arc<P>, period: Duration) -> Self {
        Self { source, period }
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// A ticker firing immediately, then once per period. Late ticks are
    /// delayed rather than bunched up.
    #[must_use]
    pub fn ticker(&self) -> Interval {
        let mut ticker = interval(self.period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Starts a request if `auto_refresh` allows it.
    #[must_use]
    pub fn request(&self, auto_refresh: bool) -> Option<PendingPosition<'_>> {
        if !auto_refresh {
            debug!("auto-refresh off; skipping position request");
            return None;
        }
        Some(self.source.current_position())
    }

    /// Requests once and applies the answer. Returns whether a request was made.
    pub async fn poll_once<S: RenderSurface>(&self, session: &mut MapSession<S>) -> bool {
        let Some(pending) = self.request(session.auto_refresh_enabled()) else {
            return false;
        };
        apply_position(session, pending.await);
        true
    }
}

/// Feeds a position outcome to the matching session handler.
pub fn apply_position<S: RenderSurface>(
    session: &mut MapSession<S>,
    outcome: Result<GeoPoint, PositionError>,
) {
    match outcome {
        Ok(point) => {
            session.on_position(point);
        }
        Err(error) => session.on_position_error(&error),
    }
}
