//! Domain primitives, map components and ports.
//!
//! Purpose: hold the map's decisions (what to label, what to select, when to
//! show labels) free of any rendering or positioning backend. Adapters reach
//! the outside world only through [`ports`].

pub mod annotation;
pub mod labels;
pub mod ports;
pub mod projection;
pub mod proximity;
pub mod record;
pub mod session;
pub mod viewer;
pub mod visibility;

pub use self::annotation::{
    AnnotationError, DerivedFacts, Freshness, HIDDEN_NAME_MARKER, SelectionText, annotate,
    annotate_batch, describe, extract_facts,
};
pub use self::labels::{LabelRegistry, abbreviate, label_markup};
pub use self::projection::{GeoPoint, PUWG_2000_ZONE_7, PlanarPoint, TransverseMercator};
pub use self::proximity::{SelectionState, find_nearest};
pub use self::record::{AnnotatedPoiRecord, PoiId, RawPoiRecord};
pub use self::session::MapSession;
pub use self::viewer::ViewerMarker;
pub use self::visibility::{DEFAULT_ZOOM_THRESHOLD, VisibilityController};
