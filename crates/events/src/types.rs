//! Event types published while a sort runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping all events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: Event,
}

impl EventEnvelope {
    /// Create a new event envelope with auto-generated ID and timestamp
    pub fn new(event: Event) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Everything a session reports while it runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The session got a fresh buffer; any previous sort was discarded
    #[serde(rename = "buffer.reset")]
    BufferReset {
        session_id: Uuid,
        values: Vec<u32>,
    },

    #[serde(rename = "sort.started")]
    SortStarted {
        session_id: Uuid,
        sort_id: Uuid,
        algorithm: String,
        size: usize,
    },

    /// One resumption of the active sort
    #[serde(rename = "sort.step")]
    Step {
        session_id: Uuid,
        sort_id: Uuid,
        /// 1-based position of this step within the sort
        step: u64,
        changed: Vec<ChangedValue>,
        active: Vec<usize>,
    },

    /// The sort ran to the end; every position is final
    #[serde(rename = "sort.completed")]
    SortCompleted {
        session_id: Uuid,
        sort_id: Uuid,
        steps: u64,
    },

    /// The sort was dropped before finishing
    #[serde(rename = "sort.cancelled")]
    SortCancelled {
        session_id: Uuid,
        sort_id: Uuid,
        steps: u64,
    },
}

/// A buffer slot and the value it now holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedValue {
    pub index: usize,
    pub value: u32,
}

impl From<(usize, u32)> for ChangedValue {
    fn from((index, value): (usize, u32)) -> Self {
        Self { index, value }
    }
}

impl Event {
    /// The session this event belongs to
    pub fn session_id(&self) -> Uuid {
        match self {
            Event::BufferReset { session_id, .. }
            | Event::SortStarted { session_id, .. }
            | Event::Step { session_id, .. }
            | Event::SortCompleted { session_id, .. }
            | Event::SortCancelled { session_id, .. } => *session_id,
        }
    }

    /// The sort this event belongs to; `None` for buffer resets
    pub fn sort_id(&self) -> Option<Uuid> {
        match self {
            Event::SortStarted { sort_id, .. }
            | Event::Step { sort_id, .. }
            | Event::SortCompleted { sort_id, .. }
            | Event::SortCancelled { sort_id, .. } => Some(*sort_id),
            Event::BufferReset { .. } => None,
        }
    }

    /// Completion or cancellation: nothing more follows for that sort.
    pub fn ends_sort(&self) -> bool {
        matches!(
            self,
            Event::SortCompleted { .. } | Event::SortCancelled { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_envelope_creation() {
        let event = Event::SortStarted {
            session_id: Uuid::new_v4(),
            sort_id: Uuid::new_v4(),
            algorithm: "quick".to_string(),
            size: 30,
        };
        let envelope = EventEnvelope::new(event);

        assert!(!envelope.id.is_nil());
        assert!(envelope.timestamp <= Utc::now());
    }

    #[test]
    fn test_step_serialization() {
        let event = Event::Step {
            session_id: Uuid::new_v4(),
            sort_id: Uuid::new_v4(),
            step: 3,
            changed: vec![(2, 40).into(), (5, 20).into()],
            active: vec![2, 5],
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("sort.step"));
        assert!(json.contains(r#"{"index":2,"value":40}"#));
        assert!(json.contains(r#""active":[2,5]"#));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"sort.completed","session_id":"550e8400-e29b-41d4-a716-446655440000","sort_id":"550e8400-e29b-41d4-a716-446655440001","steps":42}"#;
        let event: Event = serde_json::from_str(json).unwrap();

        match event {
            Event::SortCompleted { steps, sort_id, .. } => {
                assert_eq!(steps, 42);
                assert!(!sort_id.is_nil());
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn test_event_ids() {
        let session_id = Uuid::new_v4();
        let sort_id = Uuid::new_v4();

        let event = Event::SortCancelled {
            session_id,
            sort_id,
            steps: 0,
        };
        assert_eq!(event.session_id(), session_id);
        assert_eq!(event.sort_id(), Some(sort_id));

        let reset = Event::BufferReset {
            session_id,
            values: vec![3, 1, 2],
        };
        assert_eq!(reset.session_id(), session_id);
        assert_eq!(reset.sort_id(), None);

        assert!(event.ends_sort());
        assert!(!reset.ends_sort());
    }
}
