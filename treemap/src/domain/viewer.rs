//! The marker that follows the viewer's own position.

use tracing::warn;

use super::ports::{
    MapPoint, MarkerContent, MarkerDirective, MarkerHandle, MarkerMotion, PixelOffset,
    RenderSurface,
};
use super::projection::GeoPoint;

pub const VIEWER_MARKER_ID: &str = "user-loc";
pub const VIEWER_MARKER_ICON: &str = "marker.png";
pub const VIEWER_MARKER_WIDTH: u32 = 25;
pub const VIEWER_MARKER_HEIGHT: u32 = 82;

/// Lazily created viewer marker.
///
/// Every successful sample recentres the view on the viewer.
#[derive(Debug, Default)]
pub struct ViewerMarker {
    handle: Option<MarkerHandle>,
}

impl ViewerMarker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn handle(&self) -> Option<MarkerHandle> {
        self.handle
    }

    /// Places the marker at `point` and recentres on it.
    pub fn follow<S: RenderSurface + ?Sized>(&mut self, point: GeoPoint, surface: &mut S) {
        let position = MapPoint::Geographic(point);
        match self.handle {
            Some(handle) => {
                if let Err(error) = surface.move_marker(handle, position, MarkerMotion::Animate) {
                    warn!(%error, "viewer marker move failed");
                }
            }
            None => {
                let directive = MarkerDirective {
                    id: VIEWER_MARKER_ID.to_owned(),
                    position,
                    content: MarkerContent::Icon {
                        url: VIEWER_MARKER_ICON.to_owned(),
                        width: VIEWER_MARKER_WIDTH,
                        height: VIEWER_MARKER_HEIGHT,
                    },
                    offset: PixelOffset::new(0, 0),
                };
                match surface.add_marker(&directive) {
                    Ok(handle) => self.handle = Some(handle),
                    Err(error) => warn!(%error, "viewer marker creation failed"),
                }
            }
        }
        if let Err(error) = surface.set_center(position) {
            warn!(%error, "recentring on viewer failed");
        }
    }
}
