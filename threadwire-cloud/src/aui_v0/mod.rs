//! The `aui/v0` storage format.
//!
//! `aui/v0` stores a message as a compact JSON object: role, optional status,
//! content parts and metadata. It is lossy on purpose:
//!
//! - Image, file and audio parts cannot be stored; encoding such a message fails.
//! - Attachments are dropped.
//! - A `running` status is stored as `incomplete`/`cancelled`.
//! - Loaded messages always report `complete`/`unknown`.
//! - A tool call keeps `args` when it re-serializes to exactly `argsText`,
//!   otherwise it keeps `argsText` verbatim.
//!
//! Text, reasoning, source and tool call fields survive a round trip unchanged.
//!
//! # Example
//!
//! ```rust
//! use threadwire_cloud::aui_v0::{decode, encode, AUI_V0_FORMAT};
//! use threadwire_cloud::CloudMessage;
//! use threadwire_core::messages::{MessagePart, ThreadMessage};
//!
//! let message = ThreadMessage::assistant().with_part(MessagePart::text("Stored."));
//! let payload = serde_json::to_value(encode(&message)?)?;
//!
//! let record = CloudMessage::new(message.id.clone(), AUI_V0_FORMAT, payload);
//! let item = decode(&record)?;
//! assert_eq!(item.message.content, message.content);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decode;
mod encode;
mod types;

pub use decode::{decode, decode_with};
pub use encode::{encode, encode_with_settings};
pub use types::{
    AuiV0Message, AuiV0MessagePart, AuiV0Metadata, AuiV0Step, AuiV0ToolCallArgs,
    AuiV0ToolCallPart, AuiV0Usage, AUI_V0_FORMAT,
};
