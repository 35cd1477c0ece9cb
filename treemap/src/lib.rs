//! Tree register map core.
//!
//! Turns the municipal tree register's loosely structured POI records into
//! deduplicated map labels and selection summaries, and tracks the viewer's
//! live position against them. Rendering and positioning live behind the
//! ports in [`domain::ports`]; this crate only decides what should be drawn
//! and where.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::MapSettings;
pub use domain::MapSession;
