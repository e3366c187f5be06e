//! Message metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token usage of one model step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens in the completion.
    pub completion_tokens: u64,
}

impl StepUsage {
    /// Create a usage record.
    #[must_use]
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }
}

/// One model step of an assistant run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadStep {
    /// Usage reported for this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<StepUsage>,
}

impl ThreadStep {
    /// Create a step with usage.
    #[must_use]
    pub fn with_usage(usage: StepUsage) -> Self {
        Self { usage: Some(usage) }
    }
}

/// Metadata attached to a message.
///
/// User and system messages only ever populate `custom`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Opaque state snapshot.
    #[serde(default)]
    pub unstable_state: Option<Value>,
    /// Annotations streamed alongside the message.
    #[serde(default)]
    pub unstable_annotations: Vec<Value>,
    /// Data parts streamed alongside the message.
    #[serde(default)]
    pub unstable_data: Vec<Value>,
    /// Per-step records.
    #[serde(default)]
    pub steps: Vec<ThreadStep>,
    /// Application-defined metadata.
    #[serde(default)]
    pub custom: Map<String, Value>,
}

impl MessageMetadata {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata holding only custom values.
    #[must_use]
    pub fn custom_only(custom: Map<String, Value>) -> Self {
        Self {
            custom,
            ..Self::default()
        }
    }

    /// Set a custom value.
    #[must_use]
    pub fn with_custom(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    /// Add a step.
    #[must_use]
    pub fn with_step(mut self, step: ThreadStep) -> Self {
        self.steps.push(step);
        self
    }
}
