//! 通知抽象层 - 服务、溢出处理与分发
//!
//! # 设计目标
//! 1. 统一接口：所有服务实现 `NotificationService` trait
//! 2. 溢出处理：`apply_overflow` 按服务的长度限制截断或拆分消息
//! 3. 静态注册：`registry` 把 URL schema 映射到服务构造函数
//! 4. 顺序发送：每个 chunk 一次请求，全部成功才算成功
//!
//! # 使用示例
//! ```ignore
//! use notify_overflow::notification::{NotificationBuilder, NotificationMessage, OverflowMode};
//!
//! let dispatcher = NotificationBuilder::new()
//!     .url("jsons://example.com/hook")
//!     .build()?;
//!
//! let message = NotificationMessage::new("Hello").with_overflow(OverflowMode::Split);
//! dispatcher.notify(&message);
//! ```

pub mod builder;
pub mod dispatcher;
pub mod format;
pub mod notify_type;
pub mod overflow;
pub mod registry;
pub mod service;
pub mod service_url;
pub mod services;
pub mod throttle;

pub use builder::NotificationBuilder;
pub use dispatcher::NotificationDispatcher;
pub use format::NotifyFormat;
pub use notify_type::NotifyType;
pub use overflow::{apply_overflow, Chunk, OverflowLimits, OverflowMode};
pub use service::{NotificationMessage, NotificationService, SendResult, ServiceProfile};
pub use service_url::ServiceUrl;
pub use throttle::RequestThrottle;
