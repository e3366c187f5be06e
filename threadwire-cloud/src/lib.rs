//! Storage formats for threadwire messages.
//!
//! This crate converts [`ThreadMessage`](threadwire_core::ThreadMessage)s to and
//! from the payloads kept by a remote message store:
//!
//! - **[`aui_v0`]**: the `aui/v0` wire format (schema, encoder, decoder)
//! - **[`MessageFormatAdapter`]**: the seam a record store dispatches on
//! - **[`CloudMessage`]**: the record envelope carrying ID, parent and format tag
//!
//! Both directions are pure: no I/O, no shared state, safe to call from any
//! thread.
//!
//! # Example
//!
//! ```rust
//! use threadwire_cloud::{AuiV0Adapter, MessageFormatAdapter};
//! use threadwire_core::messages::{MessagePart, ThreadMessage};
//!
//! let adapter = AuiV0Adapter::new();
//! let question = ThreadMessage::user("Ping?");
//! let answer = ThreadMessage::assistant().with_part(MessagePart::text("Pong."));
//!
//! let root = adapter.to_record(&question, None)?;
//! let reply = adapter.to_record(&answer, Some(question.id.as_str()))?;
//!
//! let item = adapter.decode(&reply)?;
//! assert_eq!(item.parent_id.as_deref(), Some(root.id.as_str()));
//! # Ok::<(), threadwire_cloud::CodecError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod aui_v0;
pub mod error;
pub mod record;
pub mod settings;

pub use adapter::{AuiV0Adapter, MessageFormatAdapter};
pub use error::{CodecError, Result};
pub use record::{CloudMessage, ExportedMessageRepositoryItem};
pub use settings::CodecSettings;
