//! Rendering surface adapters that emit [`Directive`]s to a sink.
//!
//! [`DirectiveSurface`] does the handle bookkeeping every surface needs and
//! hands each accepted directive to a [`DirectiveSink`]. The sink decides
//! where directives go: an in-memory log or a JSON-lines stream.

use std::collections::HashSet;

use tracing::trace;

use crate::domain::SelectionText;
use crate::domain::ports::{
    LabelDirective, LabelHandle, MapPoint, MarkerDirective, MarkerHandle, MarkerMotion,
    RenderSurface, RenderSurfaceError,
};

mod directive;
mod json_lines;
mod recording;

pub use directive::Directive;
pub use json_lines::{JsonLinesRenderSurface, JsonLinesSink};
pub use recording::{DirectiveLog, RecordingRenderSurface};

/// Destination for directives a surface accepted.
pub trait DirectiveSink {
    /// Delivers one directive.
    fn emit(&mut self, directive: Directive) -> Result<(), RenderSurfaceError>;
}

/// A [`RenderSurface`] that tracks live handles and forwards directives.
///
/// Handles are allocated sequentially from 1, shared between labels and
/// markers. Directives naming an unknown handle are rejected.
#[derive(Debug)]
pub struct DirectiveSurface<K> {
    sink: K,
    next_handle: u64,
    labels: HashSet<LabelHandle>,
    markers: HashSet<MarkerHandle>,
}

impl<K: DirectiveSink> DirectiveSurface<K> {
    #[must_use]
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            next_handle: 1,
            labels: HashSet::new(),
            markers: HashSet::new(),
        }
    }

    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> K {
        self.sink
    }

    fn allocate(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn forward(&mut self, directive: Directive) -> Result<(), RenderSurfaceError> {
        trace!(?directive, "emitting directive");
        self.sink.emit(directive)
    }
}

impl<K: DirectiveSink> RenderSurface for DirectiveSurface<K> {
    fn add_label(&mut self, label: &LabelDirective) -> Result<LabelHandle, RenderSurfaceError> {
        let handle = LabelHandle(self.allocate());
        self.forward(Directive::AddLabel {
            handle,
            label: label.clone(),
        })?;
        self.labels.insert(handle);
        Ok(handle)
    }

    fn set_labels_visible(
        &mut self,
        labels: &[LabelHandle],
        visible: bool,
    ) -> Result<(), RenderSurfaceError> {
        if let Some(unknown) = labels.iter().find(|handle| !self.labels.contains(*handle)) {
            return Err(RenderSurfaceError::unknown_handle(unknown.0));
        }
        self.forward(Directive::SetLabelsVisible {
            labels: labels.to_vec(),
            visible,
        })
    }

    fn add_marker(&mut self, marker: &MarkerDirective) -> Result<MarkerHandle, RenderSurfaceError> {
        let handle = MarkerHandle(self.allocate());
        self.forward(Directive::AddMarker {
            handle,
            marker: marker.clone(),
        })?;
        self.markers.insert(handle);
        Ok(handle)
    }

    fn move_marker(
        &mut self,
        marker: MarkerHandle,
        position: MapPoint,
        motion: MarkerMotion,
    ) -> Result<(), RenderSurfaceError> {
        if !self.markers.contains(&marker) {
            return Err(RenderSurfaceError::unknown_handle(marker.0));
        }
        self.forward(Directive::MoveMarker {
            handle: marker,
            position,
            motion,
        })
    }

    fn set_center(&mut self, center: MapPoint) -> Result<(), RenderSurfaceError> {
        self.forward(Directive::SetCenter { center })
    }

    fn show_selection(&mut self, text: &SelectionText) -> Result<(), RenderSurfaceError> {
        self.forward(Directive::ShowSelection {
            name: text.name.clone(),
            facts: text.facts.clone(),
        })
    }
}
