//! Thread message types.
//!
//! This module provides the in-memory representation of a conversation message:
//!
//! - **Message**: [`ThreadMessage`], its [`Role`] and [`Attachment`]s
//! - **Content**: [`MessagePart`] and the structured [`SourcePart`] and [`ToolCallPart`]
//! - **Status**: [`MessageStatus`] and its reason enums
//! - **Metadata**: [`MessageMetadata`] with per-step [`StepUsage`]
//!
//! ## Example
//!
//! ```rust
//! use threadwire_core::messages::{MessagePart, MessageStatus, ThreadMessage, ToolCallPart};
//!
//! let message = ThreadMessage::assistant()
//!     .with_part(MessagePart::text("Let me check."))
//!     .with_part(ToolCallPart::from_args_text("call-1", "get_weather", r#"{"city":"Paris"}"#))
//!     .with_status(MessageStatus::Running);
//!
//! assert_eq!(message.tool_calls().count(), 1);
//! ```

pub mod message;
pub mod metadata;
pub mod parts;
pub mod status;

// Re-exports for convenience
pub use message::{Attachment, AttachmentType, Role, ThreadMessage};
pub use metadata::{MessageMetadata, StepUsage, ThreadStep};
pub use parts::{AudioData, AudioFormat, MessagePart, SourcePart, SourceType, ToolCallPart};
pub use status::{CompleteReason, IncompleteReason, MessageStatus, RequiresActionReason};
