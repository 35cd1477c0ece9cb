//! Wire form of the instructions sent to a rendering surface.

use serde::Serialize;

use crate::domain::ports::{
    LabelDirective, LabelHandle, MapPoint, MarkerDirective, MarkerHandle, MarkerMotion,
};

/// One rendering instruction, serialised with a `directive` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "directive", rename_all = "camelCase")]
pub enum Directive {
    AddLabel {
        handle: LabelHandle,
        label: LabelDirective,
    },
    SetLabelsVisible {
        labels: Vec<LabelHandle>,
        visible: bool,
    },
    AddMarker {
        handle: MarkerHandle,
        marker: MarkerDirective,
    },
    MoveMarker {
        handle: MarkerHandle,
        position: MapPoint,
        motion: MarkerMotion,
    },
    SetCenter {
        center: MapPoint,
    },
    ShowSelection {
        name: String,
        facts: String,
    },
}
