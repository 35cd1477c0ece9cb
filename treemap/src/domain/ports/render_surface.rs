//! Driven port for the map rendering surface.
//!
//! The surface owns tiles, markers and the on-screen text panel. The domain
//! only tells it what to place and where; every call is a single directive.

use serde::Serialize;

use super::define_port_error;
use crate::domain::annotation::SelectionText;
use crate::domain::projection::{GeoPoint, PlanarPoint};
use crate::domain::record::PoiId;

/// A position tagged with the coordinate system it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "crs", rename_all = "camelCase")]
pub enum MapPoint {
    /// WGS84 longitude/latitude.
    Geographic(GeoPoint),
    /// The dataset's planar grid.
    Planar(PlanarPoint),
}

/// Screen-space offset applied to a placed element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelOffset {
    pub x: i32,
    pub y: i32,
}

impl PixelOffset {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Opaque handle to a label the surface created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LabelHandle(pub u64);

/// Opaque handle to a marker the surface created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerHandle(pub u64);

/// Request to draw a persistent text label at a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDirective {
    pub id: PoiId,
    pub position: PlanarPoint,
    /// HTML fragment rendered as the label body.
    pub markup: String,
    pub offset: PixelOffset,
}

/// What a marker looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MarkerContent {
    /// An HTML fragment.
    Html { markup: String },
    /// An image icon of the given pixel size.
    Icon { url: String, width: u32, height: u32 },
}

/// Request to create a movable marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDirective {
    pub id: String,
    pub position: MapPoint,
    pub content: MarkerContent,
    pub offset: PixelOffset,
}

/// How an existing marker travels to its new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerMotion {
    Jump,
    Animate,
}

define_port_error! {
    /// Errors raised by a rendering surface.
    pub enum RenderSurfaceError {
        /// The surface refused the directive.
        Rejected { message: String } = 1 =>
            "render surface rejected directive: {message}",
        /// A handle did not refer to a live element.
        UnknownHandle { handle: u64 } = 2 =>
            "render surface has no element with handle {handle}",
        /// The surface is gone or not yet initialised.
        Unavailable { message: String } = 3 =>
            "render surface unavailable: {message}",
    }
}

/// Port for issuing render directives.
#[cfg_attr(test, mockall::automock)]
pub trait RenderSurface {
    /// Creates a label and returns its handle.
    fn add_label(&mut self, label: &LabelDirective) -> Result<LabelHandle, RenderSurfaceError>;

    /// Shows or hides every listed label.
    fn set_labels_visible(
        &mut self,
        labels: &[LabelHandle],
        visible: bool,
    ) -> Result<(), RenderSurfaceError>;

    /// Creates a marker and returns its handle.
    fn add_marker(&mut self, marker: &MarkerDirective) -> Result<MarkerHandle, RenderSurfaceError>;

    /// Moves an existing marker in place.
    fn move_marker(
        &mut self,
        marker: MarkerHandle,
        position: MapPoint,
        motion: MarkerMotion,
    ) -> Result<(), RenderSurfaceError>;

    /// Recentres the map view.
    fn set_center(&mut self, center: MapPoint) -> Result<(), RenderSurfaceError>;

    /// Replaces the selection text panel.
    fn show_selection(&mut self, text: &SelectionText) -> Result<(), RenderSurfaceError>;
}
