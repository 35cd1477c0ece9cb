//! Single-task event loop driving a [`MapSession`].
//!
//! Provider events and tracker ticks are handled one at a time on the
//! current task. A position request stays in flight across events, so the
//! viewer can toggle auto-refresh while it is pending; its answer is applied
//! regardless.

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::events::MapEvent;
use super::tracker::{PendingPosition, PositionTracker, apply_position};
use crate::domain::MapSession;
use crate::domain::ports::{PositionSource, RenderSurface};

/// Runs until the event channel closes. Returns the number of events handled.
pub async fn run_event_loop<S, P>(
    session: &mut MapSession<S>,
    mut events: mpsc::Receiver<MapEvent>,
    tracker: &PositionTracker<P>,
) -> usize
where
    S: RenderSurface,
    P: PositionSource + ?Sized,
{
    let mut ticker = tracker.ticker();
    let mut in_flight: Option<PendingPosition<'_>> = None;
    let mut handled = 0;

    loop {
        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else { break };
                debug!(kind = event.kind(), "dispatching map event");
                event.dispatch(session);
                handled += 1;
            }
            outcome = async {
                match in_flight.as_mut() {
                    Some(pending) => pending.await,
                    None => std::future::pending().await,
                }
            }, if in_flight.is_some() => {
                in_flight = None;
                apply_position(session, outcome);
            }
            _ = ticker.tick(), if in_flight.is_none() => {
                in_flight = tracker.request(session.auto_refresh_enabled());
            }
        }
    }

    info!(handled, "event channel closed; map event loop stopped");
    handled
}
