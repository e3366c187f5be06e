//! `aui/v0` wire types.
//!
//! This is the persisted shape of a message. It is narrower than
//! [`ThreadMessage`](threadwire_core::ThreadMessage): attachments, IDs and
//! timestamps are not part of it, and tool calls carry exactly one argument
//! representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use threadwire_core::json::is_json_value;
use threadwire_core::like::{
    MessageLikeContent, MessageLikeMetadata, MessageLikePart, ThreadMessageLike, ToolCallLikePart,
};
use threadwire_core::messages::{
    MessageMetadata, MessageStatus, Role, SourcePart, SourceType, StepUsage, ThreadStep,
};

use crate::error::{CodecError, Result};

/// Format tag of `aui/v0` records.
pub const AUI_V0_FORMAT: &str = "aui/v0";

/// A message in `aui/v0` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuiV0Message {
    /// Author of the message.
    pub role: Role,
    /// Run status; never `running`.
    ///
    /// Loading is lenient: a stored status this crate does not recognize
    /// reads as `None`, since decoding replaces it anyway.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_stored_status"
    )]
    pub status: Option<MessageStatus>,
    /// Ordered content parts.
    pub content: Vec<AuiV0MessagePart>,
    /// Message metadata.
    pub metadata: AuiV0Metadata,
}

fn deserialize_stored_status<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<MessageStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<Value>::deserialize(deserializer)?;
    Ok(stored.and_then(|value| serde_json::from_value(value).ok()))
}

impl AuiV0Message {
    /// Turn the payload into a message-like value.
    ///
    /// The status is left out: whatever was stored, the caller decides the
    /// status of a loaded message.
    #[must_use]
    pub fn into_message_like(
        self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> ThreadMessageLike {
        ThreadMessageLike {
            role: self.role,
            content: MessageLikeContent::Parts(
                self.content.into_iter().map(Into::into).collect(),
            ),
            id: Some(id.into()),
            created_at: Some(created_at),
            status: None,
            attachments: None,
            metadata: Some(self.metadata.into()),
        }
    }
}

/// A content part in `aui/v0` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AuiV0MessagePart {
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
    Source {
        /// Kind of source.
        #[serde(rename = "sourceType")]
        source_type: SourceType,
        /// Identifier of the source.
        id: String,
        /// Location of the source.
        url: String,
        /// Title; omitted when absent or empty.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// Tool invocation.
    ToolCall(AuiV0ToolCallPart),
}

impl From<AuiV0MessagePart> for MessageLikePart {
    fn from(part: AuiV0MessagePart) -> Self {
        match part {
            AuiV0MessagePart::Text { text } => Self::Text { text },
            AuiV0MessagePart::Reasoning { text } => Self::Reasoning { text },
            AuiV0MessagePart::Source {
                source_type,
                id,
                url,
                title,
            } => Self::Source(SourcePart {
                source_type,
                id,
                url,
                title,
            }),
            AuiV0MessagePart::ToolCall(call) => Self::ToolCall(call.into()),
        }
    }
}

/// The single argument representation stored for a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuiV0ToolCallArgs {
    /// Parsed arguments, stored when they reproduce the source text exactly.
    #[serde(rename = "args")]
    Args(Map<String, Value>),
    /// Source text, stored when the parsed form would not reproduce it.
    #[serde(rename = "argsText")]
    ArgsText(String),
}

/// A tool call in `aui/v0` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuiV0ToolCallPart {
    /// Tool call identifier.
    pub tool_call_id: String,
    /// Name of the tool.
    pub tool_name: String,
    /// Arguments, as `args` or `argsText`.
    #[serde(flatten)]
    pub args: AuiV0ToolCallArgs,
    /// Tool result; omitted unless truthy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Present and `true` only for failed calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl From<AuiV0ToolCallPart> for ToolCallLikePart {
    fn from(part: AuiV0ToolCallPart) -> Self {
        let (args, args_text) = match part.args {
            AuiV0ToolCallArgs::Args(args) => (Some(args), None),
            AuiV0ToolCallArgs::ArgsText(text) => (None, Some(text)),
        };
        Self {
            tool_call_id: Some(part.tool_call_id),
            tool_name: part.tool_name,
            args,
            args_text,
            result: part.result,
            is_error: part.is_error,
            artifact: None,
        }
    }
}

/// Token usage of a step in `aui/v0` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuiV0Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens in the completion.
    pub completion_tokens: u64,
}

/// A model step in `aui/v0` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuiV0Step {
    /// Usage reported for the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<AuiV0Usage>,
}

/// Metadata in `aui/v0` form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuiV0Metadata {
    /// Opaque state snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstable_state: Option<Value>,
    /// Streamed annotations.
    #[serde(default)]
    pub unstable_annotations: Vec<Value>,
    /// Streamed data parts.
    #[serde(default)]
    pub unstable_data: Vec<Value>,
    /// Per-step records.
    #[serde(default)]
    pub steps: Vec<AuiV0Step>,
    /// Application-defined metadata.
    #[serde(default)]
    pub custom: Map<String, Value>,
}

impl AuiV0Metadata {
    /// Copy message metadata into wire form, checking every value is plain JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidMetadata`] naming the first field whose
    /// value exceeds `max_json_depth`.
    pub fn from_metadata(metadata: &MessageMetadata, max_json_depth: usize) -> Result<Self> {
        let check = |field: &str, value: &Value| {
            if is_json_value(value, max_json_depth) {
                Ok(())
            } else {
                Err(CodecError::invalid_metadata(format!(
                    "{field} is not a plain JSON value"
                )))
            }
        };

        if let Some(state) = &metadata.unstable_state {
            check("unstable_state", state)?;
        }
        for (index, value) in metadata.unstable_annotations.iter().enumerate() {
            check(&format!("unstable_annotations[{index}]"), value)?;
        }
        for (index, value) in metadata.unstable_data.iter().enumerate() {
            check(&format!("unstable_data[{index}]"), value)?;
        }
        for (key, value) in &metadata.custom {
            check(&format!("custom.{key}"), value)?;
        }

        Ok(Self {
            unstable_state: metadata.unstable_state.clone(),
            unstable_annotations: metadata.unstable_annotations.clone(),
            unstable_data: metadata.unstable_data.clone(),
            steps: metadata.steps.iter().map(AuiV0Step::from).collect(),
            custom: metadata.custom.clone(),
        })
    }
}

impl From<&ThreadStep> for AuiV0Step {
    fn from(step: &ThreadStep) -> Self {
        Self {
            usage: step.usage.map(|usage| AuiV0Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            }),
        }
    }
}

impl From<AuiV0Step> for ThreadStep {
    fn from(step: AuiV0Step) -> Self {
        Self {
            usage: step
                .usage
                .map(|usage| StepUsage::new(usage.prompt_tokens, usage.completion_tokens)),
        }
    }
}

impl From<AuiV0Metadata> for MessageLikeMetadata {
    fn from(metadata: AuiV0Metadata) -> Self {
        Self {
            unstable_state: metadata.unstable_state,
            unstable_annotations: Some(metadata.unstable_annotations),
            unstable_data: Some(metadata.unstable_data),
            steps: Some(metadata.steps.into_iter().map(Into::into).collect()),
            custom: Some(metadata.custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use threadwire_core::json::DEFAULT_MAX_JSON_DEPTH;

    #[test]
    fn test_tool_call_args_field() {
        let part = AuiV0MessagePart::ToolCall(AuiV0ToolCallPart {
            tool_call_id: "c1".into(),
            tool_name: "lookup".into(),
            args: AuiV0ToolCallArgs::Args(Map::from_iter([("a".to_string(), json!(1))])),
            result: None,
            is_error: None,
        });
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(
            json,
            json!({"type": "tool-call", "toolCallId": "c1", "toolName": "lookup", "args": {"a": 1}})
        );
        let parsed: AuiV0MessagePart = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, part);
    }

    #[test]
    fn test_tool_call_args_text_field() {
        let json = json!({
            "type": "tool-call",
            "toolCallId": "c1",
            "toolName": "lookup",
            "argsText": "{ \"a\": 1 }",
            "result": {"ok": true},
            "isError": true
        });
        let part: AuiV0MessagePart = serde_json::from_value(json.clone()).unwrap();
        let AuiV0MessagePart::ToolCall(call) = &part else {
            panic!("expected tool call");
        };
        assert_eq!(call.args, AuiV0ToolCallArgs::ArgsText("{ \"a\": 1 }".into()));
        assert_eq!(call.is_error, Some(true));
        assert_eq!(serde_json::to_value(&part).unwrap(), json);
    }

    #[test]
    fn test_unrecognized_stored_status_reads_as_none() {
        let message: AuiV0Message = serde_json::from_value(json!({
            "role": "assistant",
            "status": {"type": "incomplete", "reason": "timeout"},
            "content": [],
            "metadata": {"unstable_annotations": [], "unstable_data": [], "steps": [], "custom": {}}
        }))
        .unwrap();
        assert_eq!(message.status, None);

        let message: AuiV0Message = serde_json::from_value(json!({
            "role": "assistant",
            "status": {"type": "complete", "reason": "stop"},
            "content": [],
            "metadata": {"unstable_annotations": [], "unstable_data": [], "steps": [], "custom": {}}
        }))
        .unwrap();
        assert_eq!(
            message.status,
            Some(MessageStatus::Complete {
                reason: threadwire_core::messages::CompleteReason::Stop
            })
        );
    }

    #[test]
    fn test_source_without_title() {
        let part: AuiV0MessagePart = serde_json::from_value(json!({
            "type": "source", "sourceType": "url", "id": "s1", "url": "https://a.example"
        }))
        .unwrap();
        assert_eq!(
            MessageLikePart::from(part),
            MessageLikePart::Source(SourcePart::url("s1", "https://a.example"))
        );
    }

    #[test]
    fn test_metadata_copy() {
        let metadata = MessageMetadata::new()
            .with_custom("topic", json!("weather"))
            .with_step(ThreadStep::with_usage(StepUsage::new(12, 4)));
        let wire = AuiV0Metadata::from_metadata(&metadata, DEFAULT_MAX_JSON_DEPTH).unwrap();
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            json!({
                "unstable_annotations": [],
                "unstable_data": [],
                "steps": [{"usage": {"promptTokens": 12, "completionTokens": 4}}],
                "custom": {"topic": "weather"}
            })
        );
    }

    #[test]
    fn test_metadata_depth_rejected() {
        let metadata = MessageMetadata::new().with_custom("deep", json!({"a": {"b": [1]}}));
        let err = AuiV0Metadata::from_metadata(&metadata, 2).unwrap_err();
        assert!(matches!(err, CodecError::InvalidMetadata(ref m) if m.contains("custom.deep")));
    }

    #[test]
    fn test_into_message_like_drops_status() {
        let message = AuiV0Message {
            role: Role::Assistant,
            status: Some(MessageStatus::cancelled()),
            content: vec![AuiV0MessagePart::Text { text: "hi".into() }],
            metadata: AuiV0Metadata::default(),
        };
        let created_at = Utc::now();
        let like = message.into_message_like("m1", created_at);
        assert_eq!(like.id.as_deref(), Some("m1"));
        assert_eq!(like.created_at, Some(created_at));
        assert!(like.status.is_none());
    }
}
