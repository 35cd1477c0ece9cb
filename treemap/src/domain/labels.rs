//! Abbreviated map labels, created at most once per tree.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::ports::{LabelDirective, LabelHandle, PixelOffset, RenderSurface};
use super::record::{AnnotatedPoiRecord, PoiId};

/// Characters kept from each word of a name.
pub const ABBREVIATION_WIDTH: usize = 3;

/// Offset applied to every label, to the right of the tree symbol.
pub const LABEL_OFFSET: PixelOffset = PixelOffset::new(10, 0);

/// Abbreviates a common name for use as a map label.
///
/// One word keeps its first three characters; two or more words keep the
/// first three characters of the first two, separated by a space.
///
/// # Examples
///
/// ```
/// use treemap::domain::abbreviate;
///
/// assert_eq!(abbreviate("Dąb szypułkowy"), "Dąb szy");
/// assert_eq!(abbreviate("Wierzba"), "Wie");
/// ```
#[must_use]
pub fn abbreviate(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().map(head).unwrap_or_default();
    match words.next() {
        Some(second) => format!("{first} {}", head(second)),
        None => first,
    }
}

fn head(word: &str) -> String {
    word.chars().take(ABBREVIATION_WIDTH).collect()
}

/// Wraps a label token in the markup the surface renders.
#[must_use]
pub fn label_markup(token: &str) -> String {
    format!(r#"<span class="label">{}</span>"#, escape_html(token))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Trees that already carry a label, and the handles of those labels.
///
/// ## Invariants
/// - An id enters `labelled` only once the surface accepted its label, and
///   never leaves it.
/// - `handles` holds exactly one entry per id in `labelled`, in creation
///   order.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    labelled: HashSet<PoiId>,
    handles: Vec<LabelHandle>,
}

impl LabelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tree already has a label.
    #[must_use]
    pub fn contains(&self, id: &PoiId) -> bool {
        self.labelled.contains(id)
    }

    /// Handles of every live label, in creation order.
    #[must_use]
    pub fn handles(&self) -> &[LabelHandle] {
        &self.handles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Builds the label directive for a record.
    #[must_use]
    pub fn directive_for(record: &AnnotatedPoiRecord) -> LabelDirective {
        LabelDirective {
            id: record.id().clone(),
            position: record.position(),
            markup: label_markup(&abbreviate(record.display_name())),
            offset: LABEL_OFFSET,
        }
    }

    /// Emits labels for every record that does not have one yet.
    ///
    /// Returns the number of labels created. A label the surface rejects is
    /// logged and left unregistered, so the next batch retries it.
    pub fn label_batch<S: RenderSurface + ?Sized>(
        &mut self,
        records: &[AnnotatedPoiRecord],
        surface: &mut S,
    ) -> usize {
        let mut created = 0;
        for record in records {
            if self.contains(record.id()) {
                continue;
            }
            let directive = Self::directive_for(record);
            match surface.add_label(&directive) {
                Ok(handle) => {
                    self.labelled.insert(record.id().clone());
                    self.handles.push(handle);
                    created += 1;
                }
                Err(error) => {
                    warn!(poi_id = %record.id(), %error, "label creation failed");
                }
            }
        }
        debug!(created, total = self.handles.len(), "labelled record batch");
        created
    }
}
