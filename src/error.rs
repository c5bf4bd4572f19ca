//! 配置边界上的校验错误

use thiserror::Error;

/// 服务配置 / 消息输入校验失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid notification format {0}")]
    InvalidFormat(String),

    #[error("Invalid overflow method {0}")]
    InvalidOverflow(String),

    #[error("Invalid notification type {0}")]
    InvalidNotifyType(String),

    #[error("Invalid HTTP method {0}")]
    InvalidMethod(String),

    #[error("Invalid service URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported schema {0}://")]
    UnknownSchema(String),

    #[error("No host was specified in {0}")]
    MissingHost(String),

    #[error("{0} is currently disabled on this system.")]
    ServiceDisabled(String),

    #[error("No message body was specified.")]
    EmptyBody,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
