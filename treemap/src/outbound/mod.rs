//! Outbound adapters implementing domain ports.
//!
//! - **surface**: [`RenderSurface`](crate::domain::ports::RenderSurface)
//!   adapters emitting serialisable directives
//! - **position**: a scripted
//!   [`PositionSource`](crate::domain::ports::PositionSource)
//! - **clock**: a fixed [`mockable::Clock`] for replays
//!
//! Adapters translate; they hold no map logic.

pub mod clock;
pub mod position;
pub mod surface;
