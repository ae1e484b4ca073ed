use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat session as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub message_count: i32,
}

impl Session {
    /// Replace the fields the backend owns with their canonical values.
    ///
    /// Only `title` and `message_count` are taken; everything the client owns
    /// transiently is left alone.
    pub fn merge_canonical(&mut self, canonical: &Session) {
        self.title = canonical.title.clone();
        self.message_count = canonical.message_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_session() {
        let json = r#"{
            "id": "s-1",
            "title": "Refund question",
            "created_at": "2026-02-01T08:00:00Z",
            "message_count": 4
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "s-1");
        assert_eq!(session.message_count, 4);
    }

    #[test]
    fn test_merge_canonical_replaces_title_and_count_only() {
        let mut local: Session = serde_json::from_str(
            r#"{"id": "s-1", "title": "old", "created_at": "2026-02-01T08:00:00Z", "message_count": 1}"#,
        )
        .unwrap();
        let created_at = local.created_at;

        let canonical: Session = serde_json::from_str(
            r#"{"id": "s-1", "title": "new", "created_at": "2026-02-02T09:00:00Z", "message_count": 3}"#,
        )
        .unwrap();

        local.merge_canonical(&canonical);
        assert_eq!(local.title, "new");
        assert_eq!(local.message_count, 3);
        // created_at is not part of the merge
        assert_eq!(local.created_at, created_at);
    }
}
