//! In-memory directive log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Directive, DirectiveSink, DirectiveSurface};
use crate::domain::ports::RenderSurfaceError;

/// Shared, cloneable record of every directive emitted.
///
/// Clones observe the same log, so a test can keep one while the session
/// owns the surface.
#[derive(Debug, Clone, Default)]
pub struct DirectiveLog {
    entries: Arc<Mutex<Vec<Directive>>>,
}

impl DirectiveLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the directives emitted so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Directive> {
        self.entries().clone()
    }

    /// Drains the log.
    pub fn take(&self) -> Vec<Directive> {
        std::mem::take(&mut *self.entries())
    }

    /// Counts the directives matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&Directive) -> bool) -> usize {
        self.entries().iter().filter(|directive| predicate(directive)).count()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Directive>> {
        // A panic while pushing cannot leave the Vec half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DirectiveSink for DirectiveLog {
    fn emit(&mut self, directive: Directive) -> Result<(), RenderSurfaceError> {
        self.entries().push(directive);
        Ok(())
    }
}

/// Surface that records directives in memory.
pub type RecordingRenderSurface = DirectiveSurface<DirectiveLog>;

impl RecordingRenderSurface {
    /// Creates a recording surface and returns the log it writes to.
    #[must_use]
    pub fn recording() -> (Self, DirectiveLog) {
        let log = DirectiveLog::new();
        (Self::new(log.clone()), log)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::PlanarPoint;
    use crate::domain::ports::{
        LabelHandle, MapPoint, MarkerContent, MarkerDirective, MarkerHandle, MarkerMotion,
        PixelOffset, RenderSurface,
    };

    fn marker() -> MarkerDirective {
        MarkerDirective {
            id: "selected-tree".to_owned(),
            position: MapPoint::Planar(PlanarPoint::new(1.0, 2.0)),
            content: MarkerContent::Html {
                markup: "<div></div>".to_owned(),
            },
            offset: PixelOffset::new(-10, -10),
        }
    }

    #[rstest]
    fn handles_are_sequential_and_logged() {
        let (mut surface, log) = RecordingRenderSurface::recording();
        let first = surface.add_marker(&marker()).expect("marker accepted");
        let second = surface.add_marker(&marker()).expect("marker accepted");
        assert_eq!((first, second), (MarkerHandle(1), MarkerHandle(2)));
        assert_eq!(
            log.count(|d| matches!(d, Directive::AddMarker { .. })),
            2
        );
    }

    #[rstest]
    fn unknown_handles_are_rejected() {
        let (mut surface, log) = RecordingRenderSurface::recording();
        let moved = surface.move_marker(
            MarkerHandle(9),
            MapPoint::Planar(PlanarPoint::new(0.0, 0.0)),
            MarkerMotion::Jump,
        );
        assert_eq!(moved, Err(RenderSurfaceError::unknown_handle(9_u64)));
        let toggled = surface.set_labels_visible(&[LabelHandle(3)], true);
        assert_eq!(toggled.map_err(|e| e.code()), Err(2));
        assert!(log.snapshot().is_empty());
    }

    #[rstest]
    fn take_drains_the_log() {
        let (mut surface, log) = RecordingRenderSurface::recording();
        surface
            .set_center(MapPoint::Planar(PlanarPoint::new(0.0, 0.0)))
            .expect("center accepted");
        assert_eq!(log.take().len(), 1);
        assert!(log.snapshot().is_empty());
    }
}
