//! 通知服务 trait 定义

use super::format::NotifyFormat;
use super::notify_type::NotifyType;
use super::overflow::{apply_overflow, Chunk, OverflowLimits, OverflowMode};
use super::service_url::ServiceUrl;
use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// 大多数服务不接受每 5 秒超过 1 次请求，5.5 秒比较安全
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(5500);

/// 服务配置（每个服务一份，创建后不再修改）
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceProfile {
    /// 长度限制与溢出策略
    pub limits: OverflowLimits,
    /// 服务接受的正文格式
    pub notify_format: NotifyFormat,
    /// 默认溢出模式
    pub overflow_mode: OverflowMode,
    /// 两次请求之间的最小间隔
    pub request_interval: Duration,
    /// 服务是否可用
    pub enabled: bool,
}

impl Default for ServiceProfile {
    fn default() -> Self {
        Self {
            limits: OverflowLimits::default(),
            notify_format: NotifyFormat::Text,
            overflow_mode: OverflowMode::Upstream,
            request_interval: DEFAULT_REQUEST_INTERVAL,
            enabled: true,
        }
    }
}

impl ServiceProfile {
    pub fn with_limits(mut self, limits: OverflowLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_notify_format(mut self, format: NotifyFormat) -> Self {
        self.notify_format = format;
        self
    }

    pub fn with_overflow_mode(mut self, mode: OverflowMode) -> Self {
        self.overflow_mode = mode;
        self
    }

    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// 应用 URL 中的通用参数 `format` 和 `overflow`
    pub fn with_url_overrides(mut self, url: &ServiceUrl) -> Result<Self> {
        if let Some(format) = url.arg("format") {
            self.notify_format = format.parse()?;
        }
        if let Some(overflow) = url.arg("overflow") {
            self.overflow_mode = overflow.parse()?;
        }
        Ok(self)
    }

    /// 生成 URL 中的通用参数
    pub fn url_parameters(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("format".to_string(), self.notify_format.to_string());
        params.insert("overflow".to_string(), self.overflow_mode.to_string());
        params
    }
}

/// 通知消息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    pub notify_type: NotifyType,
    /// 调用方声明的正文格式
    pub body_format: Option<NotifyFormat>,
    /// 覆盖服务默认的溢出模式
    pub overflow: Option<OverflowMode>,
}

impl NotificationMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_notify_type(mut self, notify_type: NotifyType) -> Self {
        self.notify_type = notify_type;
        self
    }

    pub fn with_body_format(mut self, format: NotifyFormat) -> Self {
        self.body_format = Some(format);
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = Some(overflow);
        self
    }
}

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（例如 dry-run）
    Skipped(String),
    /// 发送失败
    Failed(String),
}

impl SendResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, SendResult::Failed(_))
    }
}

/// 通知服务 trait
pub trait NotificationService: Send + Sync {
    /// 服务名称（用于日志）
    fn name(&self) -> &str;

    /// 服务配置
    fn profile(&self) -> &ServiceProfile;

    /// 发送单个 chunk
    fn send(&self, chunk: &Chunk, notify_type: NotifyType) -> anyhow::Result<SendResult>;

    /// 还原服务 URL；`privacy` 为 true 时隐藏密码
    fn url(&self, privacy: bool) -> String;

    /// 校验消息并按溢出策略拆分为待发送的 chunk
    fn build_send_calls(&self, message: &NotificationMessage) -> Result<Vec<Chunk>> {
        let profile = self.profile();

        if !profile.enabled {
            return Err(ValidationError::ServiceDisabled(self.name().to_string()));
        }

        if message.body.is_empty() {
            return Err(ValidationError::EmptyBody);
        }

        let overflow = message.overflow.unwrap_or(profile.overflow_mode);
        Ok(apply_overflow(
            &message.body,
            &message.title,
            &profile.limits,
            overflow,
            profile.notify_format,
            message.body_format,
        ))
    }

    /// 发送消息：每个 chunk 发送一次，全部成功才返回 true
    ///
    /// 某个 chunk 失败后仍会继续发送剩余的 chunk。
    fn notify(&self, message: &NotificationMessage) -> bool {
        let chunks = match self.build_send_calls(message) {
            Ok(chunks) => chunks,
            Err(e) => {
                warn!(service = self.name(), error = %e, "Notification rejected");
                return false;
            }
        };

        debug!(service = self.name(), chunks = chunks.len(), "Sending notification");

        let mut all_sent = true;
        for (idx, chunk) in chunks.iter().enumerate() {
            let result = match self.send(chunk, message.notify_type) {
                Ok(result) => result,
                Err(e) => SendResult::Failed(e.to_string()),
            };

            if let SendResult::Failed(reason) = &result {
                warn!(
                    service = self.name(),
                    chunk = idx + 1,
                    total = chunks.len(),
                    error = %reason,
                    "Chunk delivery failed"
                );
                all_sent = false;
            }
        }

        all_sent
    }
}
