//! `aui/v0` decoder.

use serde::Deserialize;
use threadwire_core::like::{MessageReconstructor, ThreadMessageLikeReconstructor};
use threadwire_core::messages::MessageStatus;
use tracing::debug;

use super::types::{AuiV0Message, AUI_V0_FORMAT};
use crate::error::{CodecError, Result};
use crate::record::{CloudMessage, ExportedMessageRepositoryItem};

/// Decode an `aui/v0` record with the default reconstructor.
///
/// The message ID and creation time come from the record envelope. Every
/// decoded message gets the status `complete` with reason `unknown`,
/// whatever status was stored.
///
/// # Errors
///
/// Fails if the record is not tagged `aui/v0`, if the payload does not match
/// the wire schema, or if the payload cannot be rebuilt into a message.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use threadwire_cloud::aui_v0::decode;
/// use threadwire_cloud::CloudMessage;
/// use threadwire_core::messages::MessageStatus;
///
/// let record = CloudMessage::new(
///     "m1",
///     "aui/v0",
///     json!({
///         "role": "assistant",
///         "status": {"type": "incomplete", "reason": "cancelled"},
///         "content": [{"type": "text", "text": "Hi!"}],
///         "metadata": {"unstable_annotations": [], "unstable_data": [], "steps": [], "custom": {}}
///     }),
/// )
/// .with_parent_id(Some("p0"));
///
/// let item = decode(&record).unwrap();
/// assert_eq!(item.parent_id.as_deref(), Some("p0"));
/// assert_eq!(item.message.id, "m1");
/// assert_eq!(item.message.status, Some(MessageStatus::complete_unknown()));
/// ```
pub fn decode(record: &CloudMessage) -> Result<ExportedMessageRepositoryItem> {
    decode_with(record, &ThreadMessageLikeReconstructor)
}

/// Decode an `aui/v0` record, rebuilding the message with `reconstructor`.
///
/// # Errors
///
/// See [`decode`]; reconstruction errors are passed through unchanged.
pub fn decode_with<R>(
    record: &CloudMessage,
    reconstructor: &R,
) -> Result<ExportedMessageRepositoryItem>
where
    R: MessageReconstructor + ?Sized,
{
    if record.format != AUI_V0_FORMAT {
        return Err(CodecError::UnsupportedFormat {
            expected: AUI_V0_FORMAT,
            found: record.format.clone(),
        });
    }

    let payload = AuiV0Message::deserialize(&record.content)?;
    let like = payload.into_message_like(record.id.clone(), record.created_at);
    let message =
        reconstructor.reconstruct(like, &record.id, MessageStatus::complete_unknown())?;

    debug!(
        message_id = %message.id,
        parent_id = ?record.parent_id,
        parts = message.content.len(),
        "Decoded aui/v0 message"
    );

    Ok(ExportedMessageRepositoryItem {
        parent_id: record.parent_id.clone(),
        message,
    })
}
