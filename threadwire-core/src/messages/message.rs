//! The thread message type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::metadata::MessageMetadata;
use super::parts::{MessagePart, ToolCallPart};
use super::status::MessageStatus;
use crate::identifier::{generate_message_id, now_utc};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Model output.
    Assistant,
    /// End-user input.
    User,
    /// System instructions.
    System,
}

impl Role {
    /// The lowercase role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    /// An image.
    Image,
    /// A text-like document.
    Document,
    /// Any other file.
    File,
}

/// A file attached to a user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment identifier.
    pub id: String,
    /// Kind of attachment.
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    /// Display name.
    pub name: String,
    /// MIME type, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Parts the attachment contributes to the prompt.
    #[serde(default)]
    pub content: Vec<MessagePart>,
}

impl Attachment {
    /// Create an attachment without content.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: AttachmentType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            content_type: None,
            content: Vec::new(),
        }
    }
}

/// A message in a conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessage {
    /// Stable identifier.
    pub id: String,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
    /// Author of the message.
    pub role: Role,
    /// Ordered content parts.
    pub content: Vec<MessagePart>,
    /// Run status, when the message came from a run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    /// Attached files (user messages only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Message metadata.
    #[serde(default)]
    pub metadata: MessageMetadata,
}

impl ThreadMessage {
    /// Create an empty message with a fresh ID.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            id: generate_message_id(),
            created_at: now_utc(),
            role,
            content: Vec::new(),
            status: None,
            attachments: Vec::new(),
            metadata: MessageMetadata::default(),
        }
    }

    /// Create an empty assistant message.
    #[must_use]
    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    /// Create a user message with a single text part.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User).with_part(MessagePart::text(text))
    }

    /// Create a system message with a single text part.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System).with_part(MessagePart::text(text))
    }

    /// Set the ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the creation time.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Append a part.
    #[must_use]
    pub fn with_part(mut self, part: impl Into<MessagePart>) -> Self {
        self.content.push(part.into());
        self
    }

    /// Append several parts.
    #[must_use]
    pub fn with_parts(mut self, parts: impl IntoIterator<Item = MessagePart>) -> Self {
        self.content.extend(parts);
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add an attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Concatenated text of all text parts.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(MessagePart::as_text)
            .collect::<Vec<_>>()
            .join("")
    }

    /// All tool call parts.
    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCallPart> {
        self.content.iter().filter_map(MessagePart::as_tool_call)
    }
}
