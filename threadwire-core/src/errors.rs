//! Error types for threadwire-core.
//!
//! Reconstruction of a [`ThreadMessage`](crate::messages::ThreadMessage) from a
//! message-like value rejects combinations the internal model cannot hold
//! (attachments on an assistant message, a status on a user message, and so on).

use thiserror::Error;

use crate::messages::Role;

/// Errors raised while building thread messages.
#[derive(Error, Debug)]
pub enum MessageError {
    /// Attachments were supplied for a role other than `user`.
    #[error("Attachments are only supported for user messages (got {role} message)")]
    AttachmentsNotAllowed {
        /// Role of the offending message.
        role: Role,
    },

    /// A status was supplied for a role other than `assistant`.
    #[error("Status is only supported for assistant messages (got {role} message)")]
    StatusNotAllowed {
        /// Role of the offending message.
        role: Role,
    },

    /// Step metadata was supplied for a role other than `assistant`.
    #[error("Steps are only supported for assistant messages (got {role} message)")]
    StepsNotAllowed {
        /// Role of the offending message.
        role: Role,
    },

    /// A content part kind is not valid for the message role.
    #[error("Unsupported {role} message part type: {part_type}")]
    UnsupportedPart {
        /// Role of the offending message.
        role: Role,
        /// The `type` tag of the rejected part.
        part_type: &'static str,
    },

    /// A system message did not consist of exactly one text part.
    #[error("System messages must have exactly one text message part")]
    InvalidSystemMessage,

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MessageError {
    /// Create an unsupported part error.
    pub fn unsupported_part(role: Role, part_type: &'static str) -> Self {
        Self::UnsupportedPart { role, part_type }
    }
}

/// Result type alias using [`MessageError`].
pub type Result<T> = std::result::Result<T, MessageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_part_message() {
        let err = MessageError::unsupported_part(Role::User, "source");
        assert_eq!(err.to_string(), "Unsupported user message part type: source");
    }

    #[test]
    fn test_role_in_message() {
        let err = MessageError::AttachmentsNotAllowed {
            role: Role::Assistant,
        };
        assert!(err.to_string().contains("assistant"));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MessageError = serde_err.into();
        assert!(matches!(err, MessageError::Serialization(_)));
    }
}
