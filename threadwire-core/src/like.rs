//! Message-like values and their reconstruction into [`ThreadMessage`]s.
//!
//! A [`ThreadMessageLike`] is the loose shape messages arrive in from outside
//! the application: content may be a bare string, identifiers and timestamps
//! may be missing, and tool calls may carry only one of their two argument
//! representations. [`from_thread_message_like`] fills the gaps and enforces
//! the per-role rules of the internal model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{MessageError, Result};
use crate::identifier::{generate_tool_call_id, now_utc};
use crate::json::{parse_partial_json_object, stringify_object};
use crate::messages::{
    Attachment, AudioData, MessageMetadata, MessagePart, MessageStatus, Role, SourcePart,
    ThreadMessage, ThreadStep, ToolCallPart,
};

/// Content of a message-like value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageLikeContent {
    /// Shorthand for a single text part.
    Text(String),
    /// Explicit parts.
    Parts(Vec<MessageLikePart>),
}

impl MessageLikeContent {
    /// Expand into explicit parts.
    #[must_use]
    pub fn into_parts(self) -> Vec<MessageLikePart> {
        match self {
            Self::Text(text) => vec![MessageLikePart::Text { text }],
            Self::Parts(parts) => parts,
        }
    }
}

impl Default for MessageLikeContent {
    fn default() -> Self {
        Self::Parts(Vec::new())
    }
}

/// A tool call whose identifier and argument forms are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallLikePart {
    /// Tool call identifier; generated when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Name of the tool.
    pub tool_name: String,
    /// Parsed arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
    /// Argument source text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args_text: Option<String>,
    /// Tool result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Whether the result is an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    /// Opaque tool artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Value>,
}

impl ToolCallLikePart {
    /// Resolve into a tool call holding both argument forms.
    fn into_tool_call(self) -> ToolCallPart {
        let (args, args_text) = match (self.args, self.args_text) {
            (Some(args), Some(text)) => (args, text),
            (Some(args), None) => {
                let text = stringify_object(&args);
                (args, text)
            }
            (None, text) => {
                let text = text.unwrap_or_default();
                (parse_partial_json_object(&text).unwrap_or_default(), text)
            }
        };
        ToolCallPart {
            tool_call_id: self.tool_call_id.unwrap_or_else(generate_tool_call_id),
            tool_name: self.tool_name,
            args,
            args_text,
            result: self.result,
            is_error: self.is_error,
            artifact: self.artifact,
        }
    }
}

impl From<ToolCallPart> for ToolCallLikePart {
    fn from(part: ToolCallPart) -> Self {
        Self {
            tool_call_id: Some(part.tool_call_id),
            tool_name: part.tool_name,
            args: Some(part.args),
            args_text: Some(part.args_text),
            result: part.result,
            is_error: part.is_error,
            artifact: part.artifact,
        }
    }
}

/// A content part of a message-like value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessageLikePart {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// Model reasoning.
    Reasoning {
        /// The reasoning text.
        text: String,
    },
    /// Source citation.
    Source(SourcePart),
    /// Tool invocation.
    ToolCall(ToolCallLikePart),
    /// Image.
    Image {
        /// Image location.
        image: String,
        /// Original file name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
    /// Arbitrary file.
    File {
        /// Base64 data or URL.
        data: String,
        /// MIME type.
        #[serde(rename = "mimeType")]
        mime_type: String,
        /// Original file name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
    /// Audio clip.
    Audio {
        /// The audio payload.
        audio: AudioData,
    },
}

impl MessageLikePart {
    /// The `type` tag of this part.
    #[must_use]
    pub fn part_type(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Reasoning { .. } => "reasoning",
            Self::Source(_) => SourcePart::PART_KIND,
            Self::ToolCall(_) => ToolCallPart::PART_KIND,
            Self::Image { .. } => "image",
            Self::File { .. } => "file",
            Self::Audio { .. } => "audio",
        }
    }
}

impl From<MessagePart> for MessageLikePart {
    fn from(part: MessagePart) -> Self {
        match part {
            MessagePart::Text { text } => Self::Text { text },
            MessagePart::Reasoning { text } => Self::Reasoning { text },
            MessagePart::Source(source) => Self::Source(source),
            MessagePart::ToolCall(call) => Self::ToolCall(call.into()),
            MessagePart::Image { image, filename } => Self::Image { image, filename },
            MessagePart::File {
                data,
                mime_type,
                filename,
            } => Self::File {
                data,
                mime_type,
                filename,
            },
            MessagePart::Audio { audio } => Self::Audio { audio },
        }
    }
}

/// Metadata of a message-like value; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageLikeMetadata {
    /// Opaque state snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstable_state: Option<Value>,
    /// Streamed annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstable_annotations: Option<Vec<Value>>,
    /// Streamed data parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstable_data: Option<Vec<Value>>,
    /// Per-step records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<ThreadStep>>,
    /// Application-defined metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Map<String, Value>>,
}

impl MessageLikeMetadata {
    fn has_steps(&self) -> bool {
        self.steps.as_ref().is_some_and(|steps| !steps.is_empty())
    }
}

impl From<MessageMetadata> for MessageLikeMetadata {
    fn from(metadata: MessageMetadata) -> Self {
        Self {
            unstable_state: metadata.unstable_state,
            unstable_annotations: Some(metadata.unstable_annotations),
            unstable_data: Some(metadata.unstable_data),
            steps: Some(metadata.steps),
            custom: Some(metadata.custom),
        }
    }
}

/// A loosely-shaped message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessageLike {
    /// Author of the message.
    pub role: Role,
    /// Message content.
    #[serde(default)]
    pub content: MessageLikeContent,
    /// Identifier, if already assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Creation time, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Explicit run status (assistant messages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    /// Attachments (user messages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageLikeMetadata>,
}

impl ThreadMessageLike {
    /// Create a message-like value with the given content.
    #[must_use]
    pub fn new(role: Role, content: MessageLikeContent) -> Self {
        Self {
            role,
            content,
            id: None,
            created_at: None,
            status: None,
            attachments: None,
            metadata: None,
        }
    }

    /// Create a message-like value from plain text.
    #[must_use]
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self::new(role, MessageLikeContent::Text(text.into()))
    }

    /// Set the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the creation time.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
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
    pub fn with_metadata(mut self, metadata: MessageLikeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl From<ThreadMessage> for ThreadMessageLike {
    fn from(message: ThreadMessage) -> Self {
        Self {
            role: message.role,
            content: MessageLikeContent::Parts(
                message.content.into_iter().map(Into::into).collect(),
            ),
            id: Some(message.id),
            created_at: Some(message.created_at),
            status: message.status,
            attachments: (!message.attachments.is_empty()).then_some(message.attachments),
            metadata: Some(message.metadata.into()),
        }
    }
}

/// Build a [`ThreadMessage`] from a message-like value.
///
/// `fallback_id` is used when the value has no identifier and
/// `fallback_status` when it has no explicit status.
///
/// # Errors
///
/// Returns an error when the value breaks a per-role rule: attachments outside
/// user messages, status or steps outside assistant messages, a part kind the
/// role cannot hold, or a system message that is not a single text part.
///
/// # Example
///
/// ```rust
/// use threadwire_core::like::{from_thread_message_like, ThreadMessageLike};
/// use threadwire_core::messages::{MessageStatus, Role};
///
/// let like = ThreadMessageLike::text(Role::Assistant, "Hello!");
/// let message = from_thread_message_like(like, "m1", MessageStatus::complete_unknown()).unwrap();
///
/// assert_eq!(message.id, "m1");
/// assert_eq!(message.text_content(), "Hello!");
/// assert_eq!(message.status, Some(MessageStatus::complete_unknown()));
/// ```
pub fn from_thread_message_like(
    like: ThreadMessageLike,
    fallback_id: &str,
    fallback_status: MessageStatus,
) -> Result<ThreadMessage> {
    let ThreadMessageLike {
        role,
        content,
        id,
        created_at,
        status,
        attachments,
        metadata,
    } = like;
    let metadata = metadata.unwrap_or_default();

    if role != Role::User && attachments.as_ref().is_some_and(|a| !a.is_empty()) {
        return Err(MessageError::AttachmentsNotAllowed { role });
    }
    if role != Role::Assistant && status.is_some() {
        return Err(MessageError::StatusNotAllowed { role });
    }
    if role != Role::Assistant && metadata.has_steps() {
        return Err(MessageError::StepsNotAllowed { role });
    }

    let parts = content.into_parts();
    let content = match role {
        Role::Assistant => assistant_content(parts)?,
        Role::User => user_content(parts)?,
        Role::System => system_content(parts)?,
    };

    let metadata = match role {
        Role::Assistant => MessageMetadata {
            unstable_state: metadata.unstable_state,
            unstable_annotations: metadata.unstable_annotations.unwrap_or_default(),
            unstable_data: metadata.unstable_data.unwrap_or_default(),
            steps: metadata.steps.unwrap_or_default(),
            custom: metadata.custom.unwrap_or_default(),
        },
        Role::User | Role::System => {
            MessageMetadata::custom_only(metadata.custom.unwrap_or_default())
        }
    };

    Ok(ThreadMessage {
        id: id.unwrap_or_else(|| fallback_id.to_string()),
        created_at: created_at.unwrap_or_else(now_utc),
        role,
        content,
        status: Some(status.unwrap_or(fallback_status)),
        attachments: attachments.unwrap_or_default(),
        metadata,
    })
}

fn assistant_content(parts: Vec<MessageLikePart>) -> Result<Vec<MessagePart>> {
    let mut content = Vec::with_capacity(parts.len());
    for part in parts {
        let part = match part {
            MessageLikePart::Text { text } | MessageLikePart::Reasoning { text }
                if text.trim().is_empty() =>
            {
                continue;
            }
            MessageLikePart::Text { text } => MessagePart::Text { text },
            MessageLikePart::Reasoning { text } => MessagePart::Reasoning { text },
            MessageLikePart::Source(source) => MessagePart::Source(source),
            MessageLikePart::ToolCall(call) => MessagePart::ToolCall(call.into_tool_call()),
            MessageLikePart::Image { image, filename } => MessagePart::Image { image, filename },
            MessageLikePart::File {
                data,
                mime_type,
                filename,
            } => MessagePart::File {
                data,
                mime_type,
                filename,
            },
            other @ MessageLikePart::Audio { .. } => {
                return Err(MessageError::unsupported_part(
                    Role::Assistant,
                    other.part_type(),
                ));
            }
        };
        content.push(part);
    }
    Ok(content)
}

fn user_content(parts: Vec<MessageLikePart>) -> Result<Vec<MessagePart>> {
    parts
        .into_iter()
        .map(|part| match part {
            MessageLikePart::Text { text } => Ok(MessagePart::Text { text }),
            MessageLikePart::Image { image, filename } => Ok(MessagePart::Image { image, filename }),
            MessageLikePart::File {
                data,
                mime_type,
                filename,
            } => Ok(MessagePart::File {
                data,
                mime_type,
                filename,
            }),
            MessageLikePart::Audio { audio } => Ok(MessagePart::Audio { audio }),
            other => Err(MessageError::unsupported_part(Role::User, other.part_type())),
        })
        .collect()
}

fn system_content(parts: Vec<MessageLikePart>) -> Result<Vec<MessagePart>> {
    match <[MessageLikePart; 1]>::try_from(parts) {
        Ok([MessageLikePart::Text { text }]) => Ok(vec![MessagePart::Text { text }]),
        _ => Err(MessageError::InvalidSystemMessage),
    }
}

/// Builds thread messages from message-like values.
///
/// Codecs call this when loading stored records so that applications can
/// substitute their own reconstruction rules.
pub trait MessageReconstructor {
    /// Build a message from `like`, falling back to the given ID and status.
    ///
    /// # Errors
    ///
    /// Returns an error when `like` cannot be represented as a thread message.
    fn reconstruct(
        &self,
        like: ThreadMessageLike,
        fallback_id: &str,
        fallback_status: MessageStatus,
    ) -> Result<ThreadMessage>;
}

/// The default reconstructor, backed by [`from_thread_message_like`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadMessageLikeReconstructor;

impl MessageReconstructor for ThreadMessageLikeReconstructor {
    fn reconstruct(
        &self,
        like: ThreadMessageLike,
        fallback_id: &str,
        fallback_status: MessageStatus,
    ) -> Result<ThreadMessage> {
        from_thread_message_like(like, fallback_id, fallback_status)
    }
}

impl<F> MessageReconstructor for F
where
    F: Fn(ThreadMessageLike, &str, MessageStatus) -> Result<ThreadMessage>,
{
    fn reconstruct(
        &self,
        like: ThreadMessageLike,
        fallback_id: &str,
        fallback_status: MessageStatus,
    ) -> Result<ThreadMessage> {
        self(like, fallback_id, fallback_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{AttachmentType, StepUsage};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn reconstruct(like: ThreadMessageLike) -> Result<ThreadMessage> {
        from_thread_message_like(like, "fallback", MessageStatus::complete_unknown())
    }

    fn tool_call(like: ToolCallLikePart) -> ToolCallPart {
        let message = reconstruct(ThreadMessageLike::new(
            Role::Assistant,
            MessageLikeContent::Parts(vec![MessageLikePart::ToolCall(like)]),
        ))
        .unwrap();
        let call = message.tool_calls().next().cloned().unwrap();
        call
    }

    #[test]
    fn test_fallbacks_applied() {
        let message = reconstruct(ThreadMessageLike::text(Role::Assistant, "hi")).unwrap();
        assert_eq!(message.id, "fallback");
        assert_eq!(message.status, Some(MessageStatus::complete_unknown()));
        assert_eq!(message.metadata, MessageMetadata::default());
    }

    #[test]
    fn test_explicit_values_win() {
        let created_at = Utc::now();
        let like = ThreadMessageLike::text(Role::Assistant, "hi")
            .with_id("given")
            .with_created_at(created_at)
            .with_status(MessageStatus::cancelled());
        let message = reconstruct(like).unwrap();
        assert_eq!(message.id, "given");
        assert_eq!(message.created_at, created_at);
        assert_eq!(message.status, Some(MessageStatus::cancelled()));
    }

    #[test]
    fn test_blank_assistant_text_dropped() {
        let like = ThreadMessageLike::new(
            Role::Assistant,
            MessageLikeContent::Parts(vec![
                MessageLikePart::Text { text: "  ".into() },
                MessageLikePart::Reasoning { text: "thinking".into() },
                MessageLikePart::Reasoning { text: String::new() },
                MessageLikePart::Text { text: "answer".into() },
            ]),
        );
        let message = reconstruct(like).unwrap();
        assert_eq!(
            message.content,
            vec![MessagePart::reasoning("thinking"), MessagePart::text("answer")]
        );
    }

    #[test]
    fn test_tool_call_with_args_only() {
        let call = tool_call(ToolCallLikePart {
            tool_call_id: Some("c1".into()),
            tool_name: "lookup".into(),
            args: Some(object(json!({"a": 1}))),
            ..Default::default()
        });
        assert_eq!(call.args_text, r#"{"a":1}"#);
        assert_eq!(call.args, object(json!({"a": 1})));
    }

    #[test]
    fn test_tool_call_with_args_text_only() {
        let call = tool_call(ToolCallLikePart {
            tool_call_id: Some("c1".into()),
            tool_name: "lookup".into(),
            args_text: Some("{ \"a\": 1 }".into()),
            ..Default::default()
        });
        assert_eq!(call.args_text, "{ \"a\": 1 }");
        assert_eq!(call.args, object(json!({"a": 1})));
    }

    #[test]
    fn test_tool_call_without_args() {
        let call = tool_call(ToolCallLikePart {
            tool_name: "lookup".into(),
            ..Default::default()
        });
        assert!(call.tool_call_id.starts_with("tool-"));
        assert_eq!(call.args_text, "");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_user_rules() {
        let like = ThreadMessageLike::new(
            Role::User,
            MessageLikeContent::Parts(vec![MessageLikePart::Reasoning { text: "x".into() }]),
        );
        let err = reconstruct(like).unwrap_err();
        assert!(matches!(
            err,
            MessageError::UnsupportedPart {
                role: Role::User,
                part_type: "reasoning"
            }
        ));

        let err = reconstruct(
            ThreadMessageLike::text(Role::User, "hi").with_status(MessageStatus::Running),
        )
        .unwrap_err();
        assert!(matches!(err, MessageError::StatusNotAllowed { .. }));
    }

    #[test]
    fn test_user_keeps_custom_metadata_only() {
        let like = ThreadMessageLike::text(Role::User, "hi").with_metadata(MessageLikeMetadata {
            unstable_data: Some(vec![json!(1)]),
            steps: Some(Vec::new()),
            custom: Some(object(json!({"k": "v"}))),
            ..Default::default()
        });
        let message = reconstruct(like).unwrap();
        assert_eq!(
            message.metadata,
            MessageMetadata::custom_only(object(json!({"k": "v"})))
        );
    }

    #[test]
    fn test_steps_rejected_outside_assistant() {
        let like = ThreadMessageLike::text(Role::User, "hi").with_metadata(MessageLikeMetadata {
            steps: Some(vec![ThreadStep::with_usage(StepUsage::new(1, 1))]),
            ..Default::default()
        });
        assert!(matches!(
            reconstruct(like),
            Err(MessageError::StepsNotAllowed { role: Role::User })
        ));
    }

    #[test]
    fn test_attachments_rejected_outside_user() {
        let mut like = ThreadMessageLike::text(Role::Assistant, "hi");
        like.attachments = Some(vec![Attachment::new("a1", AttachmentType::File, "a.txt")]);
        assert!(matches!(
            reconstruct(like),
            Err(MessageError::AttachmentsNotAllowed { .. })
        ));
    }

    #[test]
    fn test_system_requires_single_text() {
        assert!(reconstruct(ThreadMessageLike::text(Role::System, "be brief")).is_ok());

        let like = ThreadMessageLike::new(
            Role::System,
            MessageLikeContent::Parts(vec![
                MessageLikePart::Text { text: "a".into() },
                MessageLikePart::Text { text: "b".into() },
            ]),
        );
        assert!(matches!(
            reconstruct(like),
            Err(MessageError::InvalidSystemMessage)
        ));
    }

    #[test]
    fn test_thread_message_roundtrip() {
        let message = ThreadMessage::assistant()
            .with_part(MessagePart::text("hello"))
            .with_part(ToolCallPart::from_args_text("c1", "lookup", "{ \"a\": 1 }"))
            .with_status(MessageStatus::Running);
        let rebuilt = reconstruct(message.clone().into()).unwrap();
        assert_eq!(rebuilt, message);
    }

    #[test]
    fn test_closure_reconstructor() {
        let reconstructor = |like: ThreadMessageLike, id: &str, _status: MessageStatus| {
            from_thread_message_like(like, id, MessageStatus::cancelled())
        };
        let message = reconstructor
            .reconstruct(
                ThreadMessageLike::text(Role::Assistant, "hi"),
                "m1",
                MessageStatus::complete_unknown(),
            )
            .unwrap();
        assert_eq!(message.status, Some(MessageStatus::cancelled()));
    }

    #[test]
    fn test_deserialize_string_content() {
        let like: ThreadMessageLike =
            serde_json::from_value(json!({"role": "user", "content": "hello"})).unwrap();
        assert_eq!(like.content, MessageLikeContent::Text("hello".into()));
    }
}
