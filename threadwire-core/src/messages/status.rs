//! Run status of a message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Why a run is waiting on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiresActionReason {
    /// Tool calls need results before the run can continue.
    ToolCalls,
}

/// Why a run completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompleteReason {
    /// The model stopped on its own.
    Stop,
    /// The reason was not recorded.
    Unknown,
}

/// Why a run ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncompleteReason {
    /// The run was cancelled.
    Cancelled,
    /// The run stopped with unresolved tool calls.
    ToolCalls,
    /// Maximum length reached.
    Length,
    /// Content filter triggered.
    ContentFilter,
    /// Other reason.
    Other,
    /// The run failed.
    Error,
}

/// Status of the run that produced a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessageStatus {
    /// Still streaming.
    Running,
    /// Waiting on the caller.
    RequiresAction {
        /// What the caller needs to do.
        reason: RequiresActionReason,
    },
    /// Finished normally.
    Complete {
        /// Why it finished.
        reason: CompleteReason,
    },
    /// Ended before finishing.
    Incomplete {
        /// Why it ended.
        reason: IncompleteReason,
        /// Error details, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<Value>,
    },
}

impl MessageStatus {
    /// `incomplete` with reason `cancelled`.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::Incomplete {
            reason: IncompleteReason::Cancelled,
            error: None,
        }
    }

    /// `complete` with reason `unknown`.
    #[must_use]
    pub fn complete_unknown() -> Self {
        Self::Complete {
            reason: CompleteReason::Unknown,
        }
    }

    /// `incomplete` with reason `error`.
    #[must_use]
    pub fn error(error: Option<Value>) -> Self {
        Self::Incomplete {
            reason: IncompleteReason::Error,
            error,
        }
    }

    /// The `type` tag of this status.
    #[must_use]
    pub fn status_type(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::RequiresAction { .. } => "requires-action",
            Self::Complete { .. } => "complete",
            Self::Incomplete { .. } => "incomplete",
        }
    }

    /// Check if the run is still live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_type())
    }
}
