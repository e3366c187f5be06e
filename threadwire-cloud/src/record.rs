//! Storage record envelope.
//!
//! A stored message travels inside a [`CloudMessage`]: the envelope owns the
//! identifier, timestamps, parent link and format tag, and `content` holds the
//! format-specific payload. Loading a record yields an
//! [`ExportedMessageRepositoryItem`] pairing the message with its parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use threadwire_core::{now_utc, ThreadMessage};

/// A message record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudMessage {
    /// Record identifier; becomes the message ID.
    pub id: String,
    /// Identifier of the parent message, `None` for a thread root.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Depth of the message in its thread.
    #[serde(default)]
    pub height: u64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Format tag of `content`, e.g. `aui/v0`.
    pub format: String,
    /// Format-specific payload.
    pub content: Value,
}

impl CloudMessage {
    /// Create a root record timestamped now.
    #[must_use]
    pub fn new(id: impl Into<String>, format: impl Into<String>, content: Value) -> Self {
        let now = now_utc();
        Self {
            id: id.into(),
            parent_id: None,
            height: 0,
            created_at: now,
            updated_at: now,
            format: format.into(),
            content,
        }
    }

    /// Set the parent identifier.
    #[must_use]
    pub fn with_parent_id(mut self, parent_id: Option<impl Into<String>>) -> Self {
        self.parent_id = parent_id.map(Into::into);
        self
    }

    /// Set the creation time.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the thread depth.
    #[must_use]
    pub fn with_height(mut self, height: u64) -> Self {
        self.height = height;
        self
    }
}

/// A decoded message and its place in the thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedMessageRepositoryItem {
    /// Identifier of the parent message, `None` for a thread root.
    pub parent_id: Option<String>,
    /// The reconstructed message.
    pub message: ThreadMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_wire_names() {
        let record = CloudMessage::new("m1", "aui/v0", json!({}))
            .with_parent_id(Some("p0"))
            .with_height(2);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["parent_id"], "p0");
        assert_eq!(json["height"], 2);
        assert_eq!(json["format"], "aui/v0");
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn test_root_record() {
        let record: CloudMessage = serde_json::from_value(json!({
            "id": "m1",
            "parent_id": null,
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-01T12:00:00Z",
            "format": "aui/v0",
            "content": {}
        }))
        .unwrap();
        assert!(record.parent_id.is_none());
        assert_eq!(record.height, 0);
    }
}
