//! Notification type classification
//!
//! Every outbound payload carries one of these so the receiving end can
//! style the message (colour, icon, priority):
//! - INFO: plain informational message (default)
//! - SUCCESS: an operation finished well
//! - WARNING: something needs attention
//! - FAILURE: an operation failed

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Notification type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyType {
    #[default]
    Info,
    Success,
    Warning,
    Failure,
}

impl std::fmt::Display for NotifyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl NotifyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyType::Info => "info",
            NotifyType::Success => "success",
            NotifyType::Warning => "warning",
            NotifyType::Failure => "failure",
        }
    }
}

impl std::str::FromStr for NotifyType {
    type Err = ValidationError;

    /// Case-insensitive; `error`/`fail` are accepted as aliases of `failure`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(NotifyType::Info),
            "success" => Ok(NotifyType::Success),
            "warning" | "warn" => Ok(NotifyType::Warning),
            "failure" | "fail" | "error" => Ok(NotifyType::Failure),
            _ => Err(ValidationError::InvalidNotifyType(s.to_string())),
        }
    }
}
