use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emitted once per committed route change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEvent {
    pub page_name: String,
    pub path: String,
    pub timestamp: DateTime<Utc>,
}

/// Emitted when scroll depth reaches a configured threshold, at most once
/// per threshold per visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollEvent {
    pub path: String,
    pub depth_percent: u8,
    pub timestamp: DateTime<Utc>,
}

/// Emitted exactly once per visit, on the first exit signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DwellEvent {
    pub path: String,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Any event an observer can hand to the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    PageView(NavigationEvent),
    ScrollDepth(ScrollEvent),
    Dwell(DwellEvent),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    PageView,
    ScrollDepth,
    Dwell,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageView => "PageView",
            EventKind::ScrollDepth => "ScrollDepth",
            EventKind::Dwell => "Dwell",
        }
    }
}

/// Normalized outbound shape the sink forwards to the transport.
///
/// Fields not carried by the originating event kind stay `None` and are
/// omitted from the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub kind: EventKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl From<TrackingEvent> for OutboundEvent {
    fn from(event: TrackingEvent) -> Self {
        match event {
            TrackingEvent::PageView(ev) => OutboundEvent {
                kind: EventKind::PageView,
                path: ev.path,
                page_name: Some(ev.page_name),
                depth_percent: None,
                duration_ms: None,
                timestamp: ev.timestamp,
            },
            TrackingEvent::ScrollDepth(ev) => OutboundEvent {
                kind: EventKind::ScrollDepth,
                path: ev.path,
                page_name: None,
                depth_percent: Some(ev.depth_percent),
                duration_ms: None,
                timestamp: ev.timestamp,
            },
            TrackingEvent::Dwell(ev) => OutboundEvent {
                kind: EventKind::Dwell,
                path: ev.path,
                page_name: None,
                depth_percent: None,
                duration_ms: Some(ev.duration_ms),
                timestamp: ev.timestamp,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_view_normalizes_with_label_only() {
        let event = TrackingEvent::PageView(NavigationEvent {
            page_name: "Partner".into(),
            path: "/partner".into(),
            timestamp: Utc::now(),
        });

        let outbound = OutboundEvent::from(event);
        assert_eq!(outbound.kind, EventKind::PageView);
        assert_eq!(outbound.page_name.as_deref(), Some("Partner"));
        assert!(outbound.depth_percent.is_none());
        assert!(outbound.duration_ms.is_none());
    }

    #[test]
    fn absent_payload_fields_are_omitted_from_json() {
        let event = TrackingEvent::ScrollDepth(ScrollEvent {
            path: "/".into(),
            depth_percent: 50,
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&OutboundEvent::from(event)).unwrap();
        assert!(json.contains("\"depthPercent\":50"));
        assert!(!json.contains("pageName"));
        assert!(!json.contains("durationMs"));
    }
}
