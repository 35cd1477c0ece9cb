//! Inbound adapters: provider events and the position polling loop.

pub mod event_loop;
pub mod events;
pub mod tracker;

pub use event_loop::run_event_loop;
pub use events::MapEvent;
pub use tracker::{PositionTracker, apply_position};
