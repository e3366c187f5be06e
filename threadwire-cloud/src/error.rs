//! Codec error types.

use thiserror::Error;
use threadwire_core::MessageError;

/// Errors raised while encoding or decoding stored messages.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The message holds a content part the format cannot represent.
    #[error("Message part type not supported by {format}: {part_type}")]
    UnsupportedPart {
        /// Format that rejected the part.
        format: &'static str,
        /// The `type` tag of the rejected part.
        part_type: &'static str,
    },

    /// The record was written in a different format.
    #[error("Unsupported message format: expected {expected}, found {found}")]
    UnsupportedFormat {
        /// Format this codec handles.
        expected: &'static str,
        /// Format found on the record.
        found: String,
    },

    /// Message metadata does not fit the wire schema.
    #[error("Invalid message metadata: {0}")]
    InvalidMetadata(String),

    /// The payload could not be (de)serialized.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// The decoded payload could not be rebuilt into a message.
    #[error(transparent)]
    Reconstruct(#[from] MessageError),
}

impl CodecError {
    /// Create an invalid metadata error.
    pub fn invalid_metadata(message: impl Into<String>) -> Self {
        Self::InvalidMetadata(message.into())
    }

    /// Check if this error was caused by content the format cannot hold.
    ///
    /// Such messages must not be stored in this format; retrying is pointless.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPart { .. } | Self::UnsupportedFormat { .. }
        )
    }
}

/// Result type alias using [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
