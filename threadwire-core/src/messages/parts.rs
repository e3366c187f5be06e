//! Content part types for thread messages.
//!
//! A message's content is an ordered list of [`MessagePart`]s. Text, reasoning,
//! source citations and tool calls are the parts every codec understands;
//! image, file and audio parts exist in the model but not every wire format
//! can carry them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json::{js_stringify_object, parse_partial_json_object, stringify_object};

/// Kind of a source citation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A web page or other URL-addressable document.
    #[default]
    Url,
}

/// A source citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePart {
    /// Kind of source.
    pub source_type: SourceType,
    /// Identifier of the source within the message.
    pub id: String,
    /// Location of the source.
    pub url: String,
    /// Optional human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SourcePart {
    /// Part kind identifier.
    pub const PART_KIND: &'static str = "source";

    /// Create a new URL source.
    #[must_use]
    pub fn url(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source_type: SourceType::Url,
            id: id.into(),
            url: url.into(),
            title: None,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A tool invocation.
///
/// Arguments are always held twice: `args` is the parsed object and
/// `args_text` is the text it was parsed from. While a call is still
/// streaming, `args_text` may be an incomplete prefix that `args` only
/// approximates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallPart {
    /// Unique identifier for this tool call.
    pub tool_call_id: String,
    /// Name of the tool being called.
    pub tool_name: String,
    /// Parsed arguments.
    pub args: Map<String, Value>,
    /// Source text of the arguments.
    pub args_text: String,
    /// Tool result, once available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Whether the result represents a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    /// Opaque data attached by the tool for the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Value>,
}

impl ToolCallPart {
    /// Part kind identifier.
    pub const PART_KIND: &'static str = "tool-call";

    /// Create a tool call from parsed arguments.
    ///
    /// The argument text is the compact serialization of `args`.
    #[must_use]
    pub fn new(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args: Map<String, Value>,
    ) -> Self {
        let args_text = stringify_object(&args);
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            args,
            args_text,
            result: None,
            is_error: None,
            artifact: None,
        }
    }

    /// Create a tool call from raw argument text.
    ///
    /// `args` is recovered leniently; text that is not (the start of) an
    /// object yields empty arguments.
    #[must_use]
    pub fn from_args_text(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args_text: impl Into<String>,
    ) -> Self {
        let args_text = args_text.into();
        let args = parse_partial_json_object(&args_text).unwrap_or_default();
        Self::new(tool_call_id, tool_name, args).with_args_text(args_text)
    }

    /// Replace the argument text, keeping `args` as is.
    #[must_use]
    pub fn with_args_text(mut self, args_text: impl Into<String>) -> Self {
        self.args_text = args_text.into();
        self
    }

    /// Set the result.
    #[must_use]
    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Mark the result as an error.
    #[must_use]
    pub fn with_error(mut self, is_error: bool) -> Self {
        self.is_error = Some(is_error);
        self
    }

    /// Set the artifact.
    #[must_use]
    pub fn with_artifact(mut self, artifact: Value) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// Whether `args_text` is exactly what `JSON.stringify(args)` produces.
    ///
    /// Arguments holding numbers JavaScript cannot render faithfully are never
    /// canonical.
    #[must_use]
    pub fn has_canonical_args_text(&self) -> bool {
        js_stringify_object(&self.args).is_some_and(|text| text == self.args_text)
    }

    /// Whether a result has been recorded.
    #[must_use]
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }
}

/// Audio encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG layer 3.
    Mp3,
    /// Waveform audio.
    Wav,
}

/// Inline audio data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioData {
    /// Base64-encoded audio.
    pub data: String,
    /// Encoding of `data`.
    pub format: AudioFormat,
}

/// One atomic unit of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessagePart {
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
    ToolCall(ToolCallPart),
    /// Image, as a URL or data URL.
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
        /// MIME type of the file.
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

impl MessagePart {
    /// Create a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a reasoning part.
    #[must_use]
    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::Reasoning { text: text.into() }
    }

    /// Create an image part.
    #[must_use]
    pub fn image(image: impl Into<String>) -> Self {
        Self::Image {
            image: image.into(),
            filename: None,
        }
    }

    /// Create a file part.
    #[must_use]
    pub fn file(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::File {
            data: data.into(),
            mime_type: mime_type.into(),
            filename: None,
        }
    }

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

    /// Get the text if this is a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Get the tool call if this is a tool call part.
    #[must_use]
    pub fn as_tool_call(&self) -> Option<&ToolCallPart> {
        match self {
            Self::ToolCall(call) => Some(call),
            _ => None,
        }
    }
}

impl From<SourcePart> for MessagePart {
    fn from(part: SourcePart) -> Self {
        Self::Source(part)
    }
}

impl From<ToolCallPart> for MessagePart {
    fn from(part: ToolCallPart) -> Self {
        Self::ToolCall(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_tool_call_new_derives_text() {
        let call = ToolCallPart::new("call-1", "get_weather", args(json!({"city": "NYC"})));
        assert_eq!(call.args_text, r#"{"city":"NYC"}"#);
        assert!(call.has_canonical_args_text());
        assert!(!call.has_result());
    }

    #[test]
    fn test_tool_call_from_args_text() {
        let call = ToolCallPart::from_args_text("call-1", "search", "{ \"q\": \"rust\" }");
        assert_eq!(call.args, args(json!({"q": "rust"})));
        assert_eq!(call.args_text, "{ \"q\": \"rust\" }");
        assert!(!call.has_canonical_args_text());
    }

    #[test]
    fn test_integral_float_args_not_canonical() {
        let call = ToolCallPart::new("call-1", "scale", args(json!({"factor": 2.0})));
        assert_eq!(call.args_text, r#"{"factor":2.0}"#);
        assert!(!call.has_canonical_args_text());
    }

    #[test]
    fn test_tool_call_from_partial_text() {
        let call = ToolCallPart::from_args_text("call-1", "search", r#"{"q": "ru"#);
        assert_eq!(call.args, args(json!({"q": "ru"})));
    }

    #[test]
    fn test_part_serialization_tags() {
        let part = MessagePart::ToolCall(
            ToolCallPart::new("call-1", "noop", Map::new()).with_result(json!("ok")),
        );
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "tool-call");
        assert_eq!(json["toolCallId"], "call-1");
        assert_eq!(json["argsText"], "{}");
        assert!(json.get("isError").is_none());

        let source = serde_json::to_value(MessagePart::from(SourcePart::url("s1", "https://a.example")))
            .unwrap();
        assert_eq!(
            source,
            json!({"type": "source", "sourceType": "url", "id": "s1", "url": "https://a.example"})
        );
    }

    #[test]
    fn test_part_type() {
        assert_eq!(MessagePart::text("hi").part_type(), "text");
        assert_eq!(MessagePart::image("https://img").part_type(), "image");
        assert_eq!(MessagePart::file("data", "text/plain").part_type(), "file");
        let audio = MessagePart::Audio {
            audio: AudioData {
                data: String::new(),
                format: AudioFormat::Wav,
            },
        };
        assert_eq!(audio.part_type(), "audio");
    }

    #[test]
    fn test_file_part_roundtrip() {
        let part = MessagePart::file("aGVsbG8=", "text/plain");
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains(r#""mimeType":"text/plain""#));
        let parsed: MessagePart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, part);
    }
}
