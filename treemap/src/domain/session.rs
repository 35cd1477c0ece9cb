//! Event handlers tying the map components to one rendering surface.
//!
//! A [`MapSession`] owns every piece of mutable map state: the label
//! registry, the selection and viewer markers and the current annotated
//! batch. It is built once and handed by `&mut` to each handler, so handlers
//! run to completion one after another and never need locking.

use std::sync::Arc;

use chrono::Datelike;
use mockable::Clock;
use tracing::{debug, error, info, warn};

use super::annotation::{SelectionText, annotate_batch};
use super::labels::LabelRegistry;
use super::ports::{PositionError, RenderSurface};
use super::projection::{GeoPoint, TransverseMercator};
use super::proximity::{SelectionState, find_nearest};
use super::record::{AnnotatedPoiRecord, PoiId, RawPoiRecord};
use super::viewer::ViewerMarker;
use super::visibility::VisibilityController;

/// Map state and the handlers for the five provider events.
pub struct MapSession<S> {
    surface: S,
    clock: Arc<dyn Clock>,
    projector: TransverseMercator,
    visibility: VisibilityController,
    labels: LabelRegistry,
    selection: SelectionState,
    viewer: ViewerMarker,
    batch: Vec<AnnotatedPoiRecord>,
    auto_refresh: bool,
}

impl<S: RenderSurface> MapSession<S> {
    /// Creates a session projecting into PUWG 2000 zone 7, with the default
    /// zoom threshold and auto-refresh on.
    #[must_use]
    pub fn new(surface: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            surface,
            clock,
            projector: TransverseMercator::default(),
            visibility: VisibilityController::default(),
            labels: LabelRegistry::new(),
            selection: SelectionState::new(),
            viewer: ViewerMarker::new(),
            batch: Vec::new(),
            auto_refresh: true,
        }
    }

    #[must_use]
    pub fn with_zoom_threshold(mut self, threshold: u8) -> Self {
        self.visibility = VisibilityController::new(threshold);
        self
    }

    #[must_use]
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    /// Replaces the current batch and labels any tree seen for the first time.
    pub fn on_refresh(&mut self, records: &[RawPoiRecord]) {
        self.batch = annotate_batch(records);
        let created = self.labels.label_batch(&self.batch, &mut self.surface);
        info!(
            records = records.len(),
            annotated = self.batch.len(),
            labels_created = created,
            "record batch refreshed"
        );
    }

    /// Shows or hides every held label when the zoom crosses the threshold.
    pub fn on_zoom_change(&mut self, previous: u8, next: u8) {
        let Some(visible) = self.visibility.transition(previous, next) else {
            return;
        };
        if let Err(error) = self
            .surface
            .set_labels_visible(self.labels.handles(), visible)
        {
            warn!(%error, visible, "label visibility update failed");
            return;
        }
        debug!(previous, next, visible, labels = self.labels.len(), "label visibility toggled");
    }

    /// Selects the clicked tree from the current batch.
    ///
    /// Returns the text shown, or `None` when the id is not in the batch.
    pub fn on_click(&mut self, id: &PoiId) -> Option<SelectionText> {
        let Some(record) = self.batch.iter().find(|record| record.id() == id) else {
            warn!(poi_id = %id, "click on a tree outside the current batch");
            return None;
        };
        let year = self.current_year();
        Some(self.selection.select(record, year, &mut self.surface))
    }

    /// Follows the viewer and selects the tree nearest to them.
    pub fn on_position(&mut self, point: GeoPoint) -> Option<SelectionText> {
        self.viewer.follow(point, &mut self.surface);
        let planar = self.projector.project(point);
        let Some(record) = find_nearest(planar, &self.batch) else {
            debug!(
                longitude = point.longitude,
                latitude = point.latitude,
                "no trees loaded; selection unchanged"
            );
            return None;
        };
        let year = self.current_year();
        Some(self.selection.select(record, year, &mut self.surface))
    }

    /// Logs a positioning failure. Nothing is shown to the viewer.
    pub fn on_position_error(&mut self, failure: &PositionError) {
        error!(code = failure.code(), message = failure.message(), "position request failed");
    }

    /// Turns periodic position polling on or off from the next tick.
    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
        debug!(enabled, "auto-refresh toggled");
    }

    #[must_use]
    pub const fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh
    }

    /// Annotated records of the latest batch, in provider order.
    #[must_use]
    pub fn batch(&self) -> &[AnnotatedPoiRecord] {
        &self.batch
    }

    #[must_use]
    pub const fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub const fn viewer(&self) -> &ViewerMarker {
        &self.viewer
    }

    fn current_year(&self) -> i32 {
        self.clock.local().year()
    }
}
