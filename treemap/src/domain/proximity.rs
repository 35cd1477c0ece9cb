//! Nearest-tree search and the single selection marker.

use tracing::{debug, warn};

use super::annotation::{SelectionText, describe};
use super::ports::{
    MapPoint, MarkerContent, MarkerDirective, MarkerHandle, MarkerMotion, PixelOffset,
    RenderSurface,
};
use super::projection::PlanarPoint;
use super::record::AnnotatedPoiRecord;

/// Surface id of the selection marker.
pub const SELECTION_MARKER_ID: &str = "selected-tree";

/// Markup of the selection marker, centred on the tree by its offset.
pub const SELECTION_MARKER_MARKUP: &str = r#"<div class="tree-marker"></div>"#;

pub const SELECTION_MARKER_OFFSET: PixelOffset = PixelOffset::new(-10, -10);

/// Returns the candidate closest to `position`.
///
/// Distances are compared squared. On a tie the earlier candidate wins, so
/// the result is stable for a fixed ordering. An empty slice yields `None`.
///
/// # Examples
///
/// ```
/// use treemap::domain::{PlanarPoint, find_nearest};
///
/// let none = find_nearest(PlanarPoint::new(0.0, 0.0), &[]);
/// assert!(none.is_none());
/// ```
#[must_use]
pub fn find_nearest(
    position: PlanarPoint,
    candidates: &[AnnotatedPoiRecord],
) -> Option<&AnnotatedPoiRecord> {
    let mut nearest: Option<(&AnnotatedPoiRecord, f64)> = None;
    for candidate in candidates {
        let distance = position.distance_squared(candidate.position());
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((candidate, distance)),
        }
    }
    nearest.map(|(record, _)| record)
}

/// The selection marker and the last selected position.
///
/// The marker is created on the first selection and only moved afterwards.
#[derive(Debug, Default)]
pub struct SelectionState {
    marker: Option<MarkerHandle>,
    last_position: Option<PlanarPoint>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn marker(&self) -> Option<MarkerHandle> {
        self.marker
    }

    #[must_use]
    pub const fn last_position(&self) -> Option<PlanarPoint> {
        self.last_position
    }

    /// Shows a record's text and places the selection marker on it.
    ///
    /// The view is recentred only when the marker is first created. Surface
    /// failures are logged; the returned text is what was sent regardless.
    pub fn select<S: RenderSurface + ?Sized>(
        &mut self,
        record: &AnnotatedPoiRecord,
        current_year: i32,
        surface: &mut S,
    ) -> SelectionText {
        let text = describe(record, current_year);
        if let Err(error) = surface.show_selection(&text) {
            warn!(poi_id = %record.id(), %error, "selection text update failed");
        }

        let position = MapPoint::Planar(record.position());
        match self.marker {
            Some(handle) => {
                if let Err(error) = surface.move_marker(handle, position, MarkerMotion::Jump) {
                    warn!(poi_id = %record.id(), %error, "selection marker move failed");
                }
            }
            None => self.create_marker(position, surface),
        }

        self.last_position = Some(record.position());
        debug!(poi_id = %record.id(), name = %text.name, "tree selected");
        text
    }

    fn create_marker<S: RenderSurface + ?Sized>(&mut self, position: MapPoint, surface: &mut S) {
        let directive = MarkerDirective {
            id: SELECTION_MARKER_ID.to_owned(),
            position,
            content: MarkerContent::Html {
                markup: SELECTION_MARKER_MARKUP.to_owned(),
            },
            offset: SELECTION_MARKER_OFFSET,
        };
        match surface.add_marker(&directive) {
            Ok(handle) => {
                self.marker = Some(handle);
                if let Err(error) = surface.set_center(position) {
                    warn!(%error, "recentring on selection failed");
                }
            }
            Err(error) => warn!(%error, "selection marker creation failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for nearest-tree search and selection.

    use mockall::predicate::{always, eq};
    use rstest::rstest;

    use super::*;
    use crate::domain::annotation::annotate;
    use crate::domain::ports::{MockRenderSurface, RenderSurfaceError};
    use crate::domain::record::{PoiId, RawPoiRecord};

    fn tree(id: u64, x: f64, y: f64) -> AnnotatedPoiRecord {
        let raw = RawPoiRecord {
            id: PoiId::from(id),
            x,
            y,
            name: "Nazwa polska: Lipa\nWysokość w m: 9".to_owned(),
        };
        annotate(&raw).expect("fixture tree should annotate")
    }

    #[rstest]
    fn nearest_uses_planar_distance() {
        let trees = vec![tree(1, 10.0, 0.0), tree(2, 0.0, 3.0), tree(3, -5.0, -5.0)];
        let nearest = find_nearest(PlanarPoint::new(0.0, 0.0), &trees).expect("non-empty");
        assert_eq!(nearest.id(), &PoiId::from(2_u64));
    }

    #[rstest]
    fn ties_go_to_the_first_candidate() {
        let trees = vec![tree(7, -1.0, 0.0), tree(8, 1.0, 0.0)];
        for _ in 0..3 {
            let nearest = find_nearest(PlanarPoint::new(0.0, 0.0), &trees).expect("non-empty");
            assert_eq!(nearest.id(), &PoiId::from(7_u64));
        }
        let reversed = vec![tree(8, 1.0, 0.0), tree(7, -1.0, 0.0)];
        let nearest = find_nearest(PlanarPoint::new(0.0, 0.0), &reversed).expect("non-empty");
        assert_eq!(nearest.id(), &PoiId::from(8_u64));
    }

    #[rstest]
    fn empty_candidates_yield_nothing() {
        assert!(find_nearest(PlanarPoint::new(1.0, 1.0), &[]).is_none());
    }

    #[rstest]
    fn consecutive_selections_create_one_marker_and_move_it() {
        let first = tree(1, 10.0, 20.0);
        let second = tree(2, 30.0, 40.0);
        let mut surface = MockRenderSurface::new();
        surface.expect_show_selection().times(2).returning(|_| Ok(()));
        surface
            .expect_add_marker()
            .times(1)
            .returning(|_| Ok(MarkerHandle(11)));
        surface
            .expect_set_center()
            .with(eq(MapPoint::Planar(PlanarPoint::new(10.0, 20.0))))
            .times(1)
            .returning(|_| Ok(()));
        surface
            .expect_move_marker()
            .with(
                eq(MarkerHandle(11)),
                eq(MapPoint::Planar(PlanarPoint::new(30.0, 40.0))),
                eq(MarkerMotion::Jump),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut state = SelectionState::new();
        let text = state.select(&first, 2024, &mut surface);
        assert_eq!(text.name, "Lipa");
        assert_eq!(text.facts, "h 9 m");
        state.select(&second, 2024, &mut surface);

        assert_eq!(state.marker(), Some(MarkerHandle(11)));
        assert_eq!(state.last_position(), Some(PlanarPoint::new(30.0, 40.0)));
    }

    #[rstest]
    fn failed_marker_creation_is_retried_on_next_selection() {
        let oak = tree(1, 1.0, 1.0);
        let mut surface = MockRenderSurface::new();
        let mut seq = mockall::Sequence::new();
        surface.expect_show_selection().returning(|_| Ok(()));
        surface
            .expect_add_marker()
            .with(always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(RenderSurfaceError::unavailable("map not displayed")));
        surface
            .expect_add_marker()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(MarkerHandle(3)));
        surface.expect_set_center().times(1).returning(|_| Ok(()));

        let mut state = SelectionState::new();
        state.select(&oak, 2024, &mut surface);
        assert!(state.marker().is_none());
        state.select(&oak, 2024, &mut surface);
        assert_eq!(state.marker(), Some(MarkerHandle(3)));
    }
}
