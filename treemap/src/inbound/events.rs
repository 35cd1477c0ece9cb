//! Provider events and their dispatch onto a [`MapSession`].

use serde::{Deserialize, Serialize};

use crate::domain::ports::{PositionError, RenderSurface};
use crate::domain::{GeoPoint, MapSession, PoiId, RawPoiRecord, SelectionText};

/// One event from the rendering or positioning provider.
///
/// Serialised with an `event` tag, for example
/// `{"event":"zoomChange","previous":16,"next":18}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum MapEvent {
    /// A complete record batch replacing the previous one.
    Refresh { records: Vec<RawPoiRecord> },
    ZoomChange { previous: u8, next: u8 },
    /// A click on the tree with this id.
    Click { id: PoiId },
    PositionSuccess { longitude: f64, latitude: f64 },
    /// A failed position request with its geolocation code.
    PositionError { code: u16, message: String },
    /// The viewer toggled live position polling.
    AutoRefresh { enabled: bool },
}

impl MapEvent {
    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Refresh { .. } => "refresh",
            Self::ZoomChange { .. } => "zoomChange",
            Self::Click { .. } => "click",
            Self::PositionSuccess { .. } => "positionSuccess",
            Self::PositionError { .. } => "positionError",
            Self::AutoRefresh { .. } => "autoRefresh",
        }
    }

    /// Runs the matching handler. Returns the selection text when the event
    /// selected a tree.
    pub fn dispatch<S: RenderSurface>(self, session: &mut MapSession<S>) -> Option<SelectionText> {
        match self {
            Self::Refresh { records } => {
                session.on_refresh(&records);
                None
            }
            Self::ZoomChange { previous, next } => {
                session.on_zoom_change(previous, next);
                None
            }
            Self::Click { id } => session.on_click(&id),
            Self::PositionSuccess {
                longitude,
                latitude,
            } => session.on_position(GeoPoint::new(longitude, latitude)),
            Self::PositionError { code, message } => {
                session.on_position_error(&PositionError::from_code(code, message));
                None
            }
            Self::AutoRefresh { enabled } => {
                session.set_auto_refresh(enabled);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_json_snapshot;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(r#"{"event":"zoomChange","previous":16,"next":18}"#, MapEvent::ZoomChange { previous: 16, next: 18 })]
    #[case(r#"{"event":"click","id":7}"#, MapEvent::Click { id: PoiId::from(7_u64) })]
    #[case(r#"{"event":"autoRefresh","enabled":false}"#, MapEvent::AutoRefresh { enabled: false })]
    #[case(
        r#"{"event":"positionError","code":3,"message":"timeout"}"#,
        MapEvent::PositionError { code: 3, message: "timeout".to_owned() }
    )]
    fn events_parse_from_tagged_json(#[case] json: &str, #[case] expected: MapEvent) {
        let event: MapEvent = serde_json::from_str(json).expect("event should parse");
        assert_eq!(event, expected);
    }

    #[rstest]
    fn refresh_carries_raw_records() {
        let json = r#"{"event":"refresh","records":[{"id":"1","x":1.5,"y":2.5,"name":"Nazwa polska: Lipa"}]}"#;
        let event: MapEvent = serde_json::from_str(json).expect("event should parse");
        assert_eq!(event.kind(), "refresh");
        assert_json_snapshot!(event, @r###"
        {
          "event": "refresh",
          "records": [
            {
              "id": "1",
              "x": 1.5,
              "y": 2.5,
              "name": "Nazwa polska: Lipa"
            }
          ]
        }
        "###);
    }

    #[rstest]
    fn unknown_events_are_rejected() {
        let parsed = serde_json::from_str::<MapEvent>(r#"{"event":"pan","dx":1}"#);
        assert!(parsed.is_err());
    }
}
