//! Tree POI records as delivered by the data provider and after annotation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::projection::PlanarPoint;

/// Stable identity of a tree POI.
///
/// The provider sends ids as either JSON strings or numbers; both are
/// normalised to their textual form so `1` and `"1"` name the same tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPoiId", into = "String")]
pub struct PoiId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoiId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawPoiId> for PoiId {
    fn from(value: RawPoiId) -> Self {
        match value {
            RawPoiId::Text(text) => Self(text),
            RawPoiId::Signed(number) => Self(number.to_string()),
            RawPoiId::Unsigned(number) => Self(number.to_string()),
        }
    }
}

impl PoiId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for PoiId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PoiId> for String {
    fn from(value: PoiId) -> Self {
        value.0
    }
}

impl From<&str> for PoiId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<u64> for PoiId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A tree record exactly as pushed by the provider on each refresh.
///
/// `name` is the provider's free-text attribute blob: several
/// `Label: value` lines such as `Nazwa polska: 'Dąb'`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoiRecord {
    pub id: PoiId,
    pub x: f64,
    pub y: f64,
    pub name: String,
}

impl RawPoiRecord {
    /// Planar position of the tree.
    #[must_use]
    pub const fn position(&self) -> PlanarPoint {
        PlanarPoint::new(self.x, self.y)
    }
}

/// A record whose common name was extracted successfully.
///
/// ## Invariants
/// - `display_name` is non-empty once trimmed and never starts with the
///   hidden marker `**`.
/// - `original_name` is the provider blob, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedPoiRecord {
    pub(crate) id: PoiId,
    pub(crate) position: PlanarPoint,
    pub(crate) original_name: String,
    pub(crate) display_name: String,
}

impl AnnotatedPoiRecord {
    #[must_use]
    pub fn id(&self) -> &PoiId {
        &self.id
    }

    #[must_use]
    pub const fn position(&self) -> PlanarPoint {
        self.position
    }

    /// The provider blob this record was annotated from.
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// The extracted common name with quote characters removed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
