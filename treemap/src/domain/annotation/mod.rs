//! Record annotation: extracting names and facts from attribute blobs.
//!
//! The annotator runs twice over a record's blob. The first pass happens when
//! a batch arrives and decides whether the record takes part in labelling and
//! selection at all. The second pass runs on selection and derives the facts
//! line shown next to the name. Neither pass fails outward: a missing line
//! degrades to a documented fallback, and a malformed number is reported as
//! [`AnnotationError`] for the caller to log.

use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::record::{AnnotatedPoiRecord, RawPoiRecord};

mod freshness;
mod rules;
#[cfg(test)]
mod tests;

pub use freshness::Freshness;
pub use rules::AttributeLine;

/// Common names starting with this marker are hidden from the map.
pub const HIDDEN_NAME_MARKER: &str = "**";

/// Errors raised while deriving facts from a record blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// A numeric value matched its pattern but does not fit the target type.
    #[error("{field} value '{value}' is out of range")]
    NumberOutOfRange {
        /// Which attribute line held the value.
        field: &'static str,
        /// The captured text.
        value: String,
    },
}

/// Facts extracted from a record on selection. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedFacts {
    pub height_m: Option<u32>,
    pub girth_cm: Option<u32>,
    pub data_year: Option<i32>,
}

impl DerivedFacts {
    /// Trunk diameter in centimetres, rounded from the girth.
    #[must_use]
    pub fn diameter_cm(&self) -> Option<u32> {
        self.girth_cm.map(girth_to_diameter)
    }

    /// Renders the facts line: freshness first, then height, then diameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::domain::DerivedFacts;
    ///
    /// let facts = DerivedFacts { height_m: Some(18), girth_cm: Some(94), data_year: Some(2020) };
    /// assert_eq!(facts.summary(2023), "3 lata temu, h 18 m, 𝝓 30 cm");
    /// ```
    #[must_use]
    pub fn summary(&self, current_year: i32) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(year) = self.data_year {
            parts.push(Freshness::between(year, current_year).to_string());
        }
        if let Some(height) = self.height_m {
            parts.push(format!("h {height} m"));
        }
        if let Some(diameter) = self.diameter_cm() {
            parts.push(format!("𝝓 {diameter} cm"));
        }
        parts.join(", ")
    }
}

/// The two plain-text outputs shown for a selected tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionText {
    pub name: String,
    pub facts: String,
}

/// Converts a trunk girth to a diameter, rounding half away from zero.
#[must_use]
pub fn girth_to_diameter(girth_cm: u32) -> u32 {
    let diameter = (f64::from(girth_cm) / PI).round();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "girth / π is non-negative and smaller than the u32 girth"
    )]
    let diameter = diameter as u32;
    diameter
}

/// Extracts the common name from a blob, with all quote characters removed
/// and surrounding whitespace trimmed.
///
/// Returns `None` when the line is absent or the name is blank.
#[must_use]
pub fn extract_common_name(blob: &str) -> Option<String> {
    let raw = AttributeLine::CommonName.capture(blob)?;
    let name: String = raw.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_owned())
}

/// First pass: annotates a raw record, or skips it.
///
/// Records without a common-name line, or whose name starts with
/// [`HIDDEN_NAME_MARKER`], are skipped.
///
/// # Examples
///
/// ```
/// use treemap::domain::{PoiId, RawPoiRecord, annotate};
///
/// let raw = RawPoiRecord {
///     id: PoiId::from(1_u64),
///     x: 7_500_100.0,
///     y: 5_788_200.0,
///     name: "Nazwa polska: 'Dąb'\nObwód pnia w cm: 94".to_owned(),
/// };
/// let annotated = annotate(&raw).expect("record has a common name");
/// assert_eq!(annotated.display_name(), "Dąb");
/// ```
#[must_use]
pub fn annotate(record: &RawPoiRecord) -> Option<AnnotatedPoiRecord> {
    let display_name = extract_common_name(&record.name)?;
    if display_name.starts_with(HIDDEN_NAME_MARKER) {
        return None;
    }
    Some(AnnotatedPoiRecord {
        id: record.id.clone(),
        position: record.position(),
        original_name: record.name.clone(),
        display_name,
    })
}

/// Annotates a whole batch, keeping provider order and dropping skipped records.
#[must_use]
pub fn annotate_batch(records: &[RawPoiRecord]) -> Vec<AnnotatedPoiRecord> {
    let annotated: Vec<_> = records.iter().filter_map(annotate).collect();
    debug!(
        received = records.len(),
        annotated = annotated.len(),
        skipped = records.len() - annotated.len(),
        "annotated record batch"
    );
    annotated
}

/// Second pass: extracts height, girth and data year from a blob.
///
/// # Errors
///
/// Returns [`AnnotationError::NumberOutOfRange`] when a matched number does
/// not fit its integer type.
pub fn extract_facts(blob: &str) -> Result<DerivedFacts, AnnotationError> {
    Ok(DerivedFacts {
        height_m: parse_number(AttributeLine::HeightMetres, blob)?,
        girth_cm: parse_number(AttributeLine::TrunkGirthCentimetres, blob)?,
        data_year: parse_number(AttributeLine::DataCurrencyYear, blob)?,
    })
}

fn parse_number<T: std::str::FromStr>(
    line: AttributeLine,
    blob: &str,
) -> Result<Option<T>, AnnotationError> {
    line.capture(blob)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| AnnotationError::NumberOutOfRange {
                    field: line.field_name(),
                    value: value.to_owned(),
                })
        })
        .transpose()
}

/// Builds the selection text for a record. Never fails.
///
/// If the common name cannot be re-read from the original blob, or any fact
/// fails to parse, the name falls back to the original blob verbatim and the
/// facts line is left empty.
#[must_use]
pub fn describe(record: &AnnotatedPoiRecord, current_year: i32) -> SelectionText {
    let fallback = || SelectionText {
        name: record.original_name.clone(),
        facts: String::new(),
    };

    let Some(name) = extract_common_name(&record.original_name) else {
        debug!(poi_id = %record.id, "common name missing on selection; showing raw attributes");
        return fallback();
    };

    match extract_facts(&record.original_name) {
        Ok(facts) => SelectionText {
            name,
            facts: facts.summary(current_year),
        },
        Err(error) => {
            warn!(poi_id = %record.id, %error, "failed to derive tree facts");
            fallback()
        }
    }
}
