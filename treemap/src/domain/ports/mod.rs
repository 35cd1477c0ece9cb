//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod position_source;
mod render_surface;

#[cfg(test)]
pub use position_source::MockPositionSource;
pub use position_source::{PositionError, PositionSource};
#[cfg(test)]
pub use render_surface::MockRenderSurface;
pub use render_surface::{
    LabelDirective, LabelHandle, MapPoint, MarkerContent, MarkerDirective, MarkerHandle,
    MarkerMotion, PixelOffset, RenderSurface, RenderSurfaceError,
};
