//! Format adapters.
//!
//! Each storage format is a [`MessageFormatAdapter`]. A new format is added as
//! a sibling adapter; existing ones never change what they write.

use serde_json::Value;
use threadwire_core::like::MessageReconstructor;
use threadwire_core::ThreadMessage;

use crate::aui_v0::{self, AUI_V0_FORMAT};
use crate::error::Result;
use crate::record::{CloudMessage, ExportedMessageRepositoryItem};
use crate::settings::CodecSettings;

/// Converts messages to and from one storage format.
pub trait MessageFormatAdapter {
    /// Format tag written to and expected on records.
    fn format(&self) -> &'static str;

    /// Encode a message into the record payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be represented in this format.
    fn encode(&self, message: &ThreadMessage) -> Result<Value>;

    /// Decode a record into a message and its parent link.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not in this format or is malformed.
    fn decode(&self, record: &CloudMessage) -> Result<ExportedMessageRepositoryItem>;

    /// Wrap an encoded message in a record envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn to_record(&self, message: &ThreadMessage, parent_id: Option<&str>) -> Result<CloudMessage> {
        let content = self.encode(message)?;
        Ok(CloudMessage::new(message.id.clone(), self.format(), content)
            .with_parent_id(parent_id)
            .with_created_at(message.created_at))
    }
}

/// Adapter for the `aui/v0` format.
#[derive(Debug, Clone, Default)]
pub struct AuiV0Adapter {
    settings: CodecSettings,
}

impl AuiV0Adapter {
    /// Create an adapter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter with the given settings.
    #[must_use]
    pub fn with_settings(settings: CodecSettings) -> Self {
        Self { settings }
    }

    /// The adapter settings.
    #[must_use]
    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    /// Decode a record with a custom reconstructor.
    ///
    /// # Errors
    ///
    /// See [`aui_v0::decode_with`].
    pub fn decode_with<R>(
        &self,
        record: &CloudMessage,
        reconstructor: &R,
    ) -> Result<ExportedMessageRepositoryItem>
    where
        R: MessageReconstructor + ?Sized,
    {
        aui_v0::decode_with(record, reconstructor)
    }
}

impl MessageFormatAdapter for AuiV0Adapter {
    fn format(&self) -> &'static str {
        AUI_V0_FORMAT
    }

    fn encode(&self, message: &ThreadMessage) -> Result<Value> {
        let wire = aui_v0::encode_with_settings(message, &self.settings)?;
        Ok(serde_json::to_value(wire)?)
    }

    fn decode(&self, record: &CloudMessage) -> Result<ExportedMessageRepositoryItem> {
        aui_v0::decode(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use threadwire_core::messages::{MessagePart, MessageStatus};

    #[test]
    fn test_format_tag() {
        assert_eq!(AuiV0Adapter::new().format(), "aui/v0");
    }

    #[test]
    fn test_to_record() {
        let message = ThreadMessage::assistant()
            .with_id("m2")
            .with_part(MessagePart::text("Sure."));
        let record = AuiV0Adapter::new().to_record(&message, Some("m1")).unwrap();

        assert_eq!(record.id, "m2");
        assert_eq!(record.parent_id.as_deref(), Some("m1"));
        assert_eq!(record.format, "aui/v0");
        assert_eq!(record.created_at, message.created_at);
        assert_eq!(record.content["content"], json!([{"type": "text", "text": "Sure."}]));
    }

    #[test]
    fn test_record_roundtrip() {
        let adapter = AuiV0Adapter::new();
        let message = ThreadMessage::assistant()
            .with_part(MessagePart::text("Working on it"))
            .with_status(MessageStatus::Running);
        let record = adapter.to_record(&message, None).unwrap();

        let item = adapter.decode(&record).unwrap();
        assert_eq!(item.parent_id, None);
        assert_eq!(item.message.id, message.id);
        assert_eq!(item.message.created_at, message.created_at);
        assert_eq!(item.message.content, message.content);
        assert_eq!(item.message.status, Some(MessageStatus::complete_unknown()));
        assert_eq!(record.content["status"]["reason"], "cancelled");
    }

    #[test]
    fn test_unsupported_message_not_recorded() {
        let message =
            ThreadMessage::user("see attached").with_part(MessagePart::image("https://i"));
        let err = AuiV0Adapter::new().to_record(&message, None).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_settings_applied() {
        let adapter = AuiV0Adapter::with_settings(CodecSettings::new().max_json_depth(1));
        let message = ThreadMessage::assistant().with_metadata(
            threadwire_core::MessageMetadata::new().with_custom("nested", json!([[1]])),
        );
        let err = adapter.encode(&message).unwrap_err();
        assert!(matches!(err, CodecError::InvalidMetadata(_)));
        assert_eq!(adapter.settings().max_json_depth, 1);
    }
}
