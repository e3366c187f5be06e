//! ID generation utilities.
//!
//! Message and tool call identifiers are opaque strings; these helpers only
//! guarantee uniqueness and a recognizable prefix.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a unique message ID.
///
/// # Example
///
/// ```rust
/// use threadwire_core::identifier::generate_message_id;
///
/// let id = generate_message_id();
/// assert!(id.starts_with("msg_"));
/// assert_eq!(id.len(), 36); // "msg_" + 32 hex chars
/// ```
#[must_use]
pub fn generate_message_id() -> String {
    format!("msg_{}", Uuid::new_v4().simple())
}

/// Generate an ID for a tool call that arrived without one.
///
/// # Example
///
/// ```rust
/// use threadwire_core::identifier::generate_tool_call_id;
///
/// assert!(generate_tool_call_id().starts_with("tool-"));
/// ```
#[must_use]
pub fn generate_tool_call_id() -> String {
    format!("tool-{}", Uuid::new_v4().simple())
}

/// Get the current UTC timestamp.
#[must_use]
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_unique() {
        assert_ne!(generate_message_id(), generate_message_id());
    }

    #[test]
    fn test_tool_call_id_format() {
        let id = generate_tool_call_id();
        assert!(id.starts_with("tool-"));
        assert_eq!(id.len(), 37);
    }
}
