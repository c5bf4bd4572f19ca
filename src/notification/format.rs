//! Body formats understood by notification services

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// 消息正文格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyFormat {
    #[default]
    Text,
    Markdown,
    Html,
}

impl NotifyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyFormat::Text => "text",
            NotifyFormat::Markdown => "markdown",
            NotifyFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for NotifyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotifyFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(NotifyFormat::Text),
            "markdown" => Ok(NotifyFormat::Markdown),
            "html" => Ok(NotifyFormat::Html),
            _ => Err(ValidationError::InvalidFormat(s.to_string())),
        }
    }
}
