//! Notify Overflow - 按服务限制截断或拆分通知消息并发送

pub mod cli;
pub mod config;
pub mod error;
pub mod notification;

pub use config::NotifyConfig;
pub use error::ValidationError;
pub use notification::{
    apply_overflow, Chunk, NotificationBuilder, NotificationDispatcher, NotificationMessage,
    NotificationService, NotifyFormat, NotifyType, OverflowLimits, OverflowMode, SendResult,
    ServiceProfile, ServiceUrl,
};
