//! Typed events decoded from stream frames.

use serde::Deserialize;
use serde_json::Value;

use crate::models::QuickAction;

/// One event from the streaming chat endpoint.
///
/// The wire payload is a JSON object tagged by `type`. Event kinds this client
/// does not understand deserialize to [`StreamEvent::Unrecognized`] and are
/// dropped by the reducer so an unknown frame never interrupts the stream.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Classification of the user turn
    Intent { intent: String },
    /// Reasoning trace; a replacement snapshot, not a delta
    Thinking { content: String },
    /// Text fragment appended to the message content
    Content { delta: String },
    /// Terminal event carrying the answer's backing data
    End {
        #[serde(default)]
        sources: Vec<Value>,
        #[serde(default)]
        quick_actions: Vec<QuickAction>,
    },
    /// Unknown event kind; ignored
    #[serde(other)]
    Unrecognized,
}

impl StreamEvent {
    /// Event type name for logging.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StreamEvent::Intent { .. } => "intent",
            StreamEvent::Thinking { .. } => "thinking",
            StreamEvent::Content { .. } => "content",
            StreamEvent::End { .. } => "end",
            StreamEvent::Unrecognized => "unrecognized",
        }
    }

    /// Whether this event terminates the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::End { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_intent() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"intent","intent":"order_inquiry"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Intent {
                intent: "order_inquiry".to_string()
            }
        );
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_deserialize_thinking() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"thinking","content":"checking orders"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Thinking {
                content: "checking orders".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_content() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"content","delta":"Hel"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Content {
                delta: "Hel".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_end() {
        let event: StreamEvent = serde_json::from_str(
            r#"{"type":"end","sources":[{"doc":"faq"}],"quick_actions":[]}"#,
        )
        .unwrap();
        match event {
            StreamEvent::End { sources, quick_actions } => {
                assert_eq!(sources.len(), 1);
                assert!(quick_actions.is_empty());
            }
            other => panic!("expected End, got {:?}", other),
        }
    }

    #[test]
    fn test_end_fields_default_when_missing() {
        let event: StreamEvent = serde_json::from_str(r#"{"type":"end"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::End {
                sources: Vec::new(),
                quick_actions: Vec::new()
            }
        );
        assert!(event.is_terminal());
    }

    #[test]
    fn test_unknown_type_maps_to_unrecognized() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"usage","tokens":42}"#).unwrap();
        assert_eq!(event, StreamEvent::Unrecognized);
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(
            StreamEvent::Content { delta: String::new() }.event_type_name(),
            "content"
        );
        assert_eq!(StreamEvent::Unrecognized.event_type_name(), "unrecognized");
    }
}
