//! # threadwire-core
//!
//! Core types for the threadwire message codecs.
//!
//! This crate provides the in-memory side of the codec boundary:
//!
//! - **Messages**: [`ThreadMessage`] with its content parts, status and metadata
//! - **Message-like values**: [`ThreadMessageLike`] and the
//!   [`MessageReconstructor`] that turns them back into messages
//! - **JSON helpers**: depth-limited JSON checks, truthiness, partial object parsing
//! - **Identifiers**: message and tool call ID generation
//! - **Errors**: [`MessageError`] for reconstruction failures
//!
//! ## Example
//!
//! ```rust
//! use threadwire_core::{
//!     like::{from_thread_message_like, ThreadMessageLike},
//!     messages::{MessageStatus, Role},
//! };
//!
//! let like = ThreadMessageLike::text(Role::User, "What's the weather?");
//! let message = from_thread_message_like(like, "msg-1", MessageStatus::complete_unknown())
//!     .expect("valid user message");
//!
//! assert_eq!(message.role, Role::User);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod errors;
pub mod identifier;
pub mod json;
pub mod like;
pub mod messages;

// Re-exports for convenience
pub use errors::{MessageError, Result};
pub use identifier::{generate_message_id, generate_tool_call_id, now_utc};
pub use like::{
    from_thread_message_like, MessageLikeContent, MessageLikeMetadata, MessageLikePart,
    MessageReconstructor, ThreadMessageLike, ThreadMessageLikeReconstructor, ToolCallLikePart,
};
pub use messages::{
    Attachment, AttachmentType, MessageMetadata, MessagePart, MessageStatus, Role, SourcePart,
    SourceType, StepUsage, ThreadMessage, ThreadStep, ToolCallPart,
};

/// Prelude module for common imports.
///
/// ```rust
/// use threadwire_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::errors::{MessageError, Result};
    pub use crate::like::{
        from_thread_message_like, MessageReconstructor, ThreadMessageLike,
        ThreadMessageLikeReconstructor,
    };
    pub use crate::messages::{
        MessageMetadata, MessagePart, MessageStatus, Role, SourcePart, ThreadMessage,
        ThreadStep, ToolCallPart,
    };
}
