//! `aui/v0` encoder.

use threadwire_core::json::{is_json_value, is_truthy};
use threadwire_core::messages::{MessagePart, MessageStatus, ThreadMessage, ToolCallPart};
use tracing::{debug, warn};

use super::types::{
    AuiV0Message, AuiV0MessagePart, AuiV0Metadata, AuiV0ToolCallArgs, AuiV0ToolCallPart,
    AUI_V0_FORMAT,
};
use crate::error::{CodecError, Result};
use crate::settings::CodecSettings;

/// Encode a message with default settings.
///
/// Attachments, the message ID and the creation time are not part of the
/// payload; the storage record carries the latter two.
///
/// # Errors
///
/// Fails with [`CodecError::UnsupportedPart`] if the message holds an image,
/// file or audio part, and with [`CodecError::InvalidMetadata`] if metadata
/// is not plain JSON. No partial output is produced.
///
/// # Example
///
/// ```rust
/// use threadwire_cloud::aui_v0::encode;
/// use threadwire_core::messages::{MessagePart, MessageStatus, ThreadMessage};
///
/// let message = ThreadMessage::assistant()
///     .with_part(MessagePart::text("Hello!"))
///     .with_status(MessageStatus::Running);
///
/// let wire = encode(&message).unwrap();
/// assert_eq!(wire.status, Some(MessageStatus::cancelled()));
/// ```
pub fn encode(message: &ThreadMessage) -> Result<AuiV0Message> {
    encode_with_settings(message, &CodecSettings::default())
}

/// Encode a message.
///
/// # Errors
///
/// See [`encode`].
pub fn encode_with_settings(
    message: &ThreadMessage,
    settings: &CodecSettings,
) -> Result<AuiV0Message> {
    let content = message
        .content
        .iter()
        .map(|part| encode_part(part, settings))
        .collect::<Result<Vec<_>>>()?;
    let metadata = AuiV0Metadata::from_metadata(&message.metadata, settings.max_json_depth)?;

    if !message.attachments.is_empty() {
        debug!(
            message_id = %message.id,
            attachments = message.attachments.len(),
            "Dropping attachments from aui/v0 payload"
        );
    }
    debug!(
        message_id = %message.id,
        role = %message.role,
        parts = content.len(),
        "Encoded aui/v0 message"
    );

    Ok(AuiV0Message {
        role: message.role,
        status: message.status.as_ref().map(encode_status),
        content,
        metadata,
    })
}

/// A live run cannot be persisted as live; it is stored as cancelled.
fn encode_status(status: &MessageStatus) -> MessageStatus {
    match status {
        MessageStatus::Running => MessageStatus::cancelled(),
        other => other.clone(),
    }
}

fn encode_part(part: &MessagePart, settings: &CodecSettings) -> Result<AuiV0MessagePart> {
    match part {
        MessagePart::Text { text } => Ok(AuiV0MessagePart::Text { text: text.clone() }),
        MessagePart::Reasoning { text } => Ok(AuiV0MessagePart::Reasoning { text: text.clone() }),
        MessagePart::Source(source) => Ok(AuiV0MessagePart::Source {
            source_type: source.source_type,
            id: source.id.clone(),
            url: source.url.clone(),
            title: source.title.clone().filter(|title| !title.is_empty()),
        }),
        MessagePart::ToolCall(call) => {
            Ok(AuiV0MessagePart::ToolCall(encode_tool_call(call, settings)))
        }
        MessagePart::Image { .. } | MessagePart::File { .. } | MessagePart::Audio { .. } => {
            Err(CodecError::UnsupportedPart {
                format: AUI_V0_FORMAT,
                part_type: part.part_type(),
            })
        }
    }
}

fn encode_tool_call(call: &ToolCallPart, settings: &CodecSettings) -> AuiV0ToolCallPart {
    if let Some(result) = &call.result {
        if settings.warn_on_non_json_result && !is_json_value(result, settings.max_json_depth) {
            warn!(
                tool_call_id = %call.tool_call_id,
                tool_name = %call.tool_name,
                "tool-call result is not JSON"
            );
        }
    }

    let args = if call.has_canonical_args_text() {
        AuiV0ToolCallArgs::Args(call.args.clone())
    } else {
        AuiV0ToolCallArgs::ArgsText(call.args_text.clone())
    };

    AuiV0ToolCallPart {
        tool_call_id: call.tool_call_id.clone(),
        tool_name: call.tool_name.clone(),
        args,
        result: call.result.clone().filter(is_truthy),
        is_error: call.is_error.unwrap_or(false).then_some(true),
    }
}
