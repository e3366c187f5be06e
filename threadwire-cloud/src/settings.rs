//! Codec settings.

use serde::{Deserialize, Serialize};
use threadwire_core::json::DEFAULT_MAX_JSON_DEPTH;

/// Settings shared by the storage codecs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSettings {
    /// Nesting depth past which a value is not considered plain JSON.
    #[serde(default = "default_max_json_depth")]
    pub max_json_depth: usize,

    /// Log a warning when a tool result is not plain JSON.
    #[serde(default = "default_warn_on_non_json_result")]
    pub warn_on_non_json_result: bool,
}

fn default_max_json_depth() -> usize {
    DEFAULT_MAX_JSON_DEPTH
}

fn default_warn_on_non_json_result() -> bool {
    true
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            max_json_depth: default_max_json_depth(),
            warn_on_non_json_result: default_warn_on_non_json_result(),
        }
    }
}

impl CodecSettings {
    /// Create default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSON nesting limit.
    #[must_use]
    pub fn max_json_depth(mut self, depth: usize) -> Self {
        self.max_json_depth = depth;
        self
    }

    /// Enable or disable the non-JSON result warning.
    #[must_use]
    pub fn warn_on_non_json_result(mut self, warn: bool) -> Self {
        self.warn_on_non_json_result = warn;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CodecSettings::new();
        assert_eq!(settings.max_json_depth, 100);
        assert!(settings.warn_on_non_json_result);
    }

    #[test]
    fn test_builder() {
        let settings = CodecSettings::new()
            .max_json_depth(8)
            .warn_on_non_json_result(false);
        assert_eq!(settings.max_json_depth, 8);
        assert!(!settings.warn_on_non_json_result);
    }

    #[test]
    fn test_partial_deserialize() {
        let settings: CodecSettings = serde_json::from_str(r#"{"max_json_depth": 3}"#).unwrap();
        assert_eq!(settings.max_json_depth, 3);
        assert!(settings.warn_on_non_json_result);
    }
}
