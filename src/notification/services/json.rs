//! JSON Webhook 服务（json:// 和 jsons://）
//!
//! 每个 chunk 发送一次请求，正文为：
//!
//! ```json
//! {"version": "1.0", "title": "...", "message": "...", "type": "info"}
//! ```

use super::http::{HttpTarget, RequestBody};
use crate::error::Result;
use crate::notification::notify_type::NotifyType;
use crate::notification::overflow::Chunk;
use crate::notification::service::{NotificationService, SendResult, ServiceProfile};
use crate::notification::service_url::ServiceUrl;
use serde_json::Value;
use std::time::Duration;

/// JSON Webhook 服务
#[derive(Debug)]
pub struct JsonService {
    profile: ServiceProfile,
    target: HttpTarget,
}

impl JsonService {
    pub const PROTOCOL: &'static str = "json";
    pub const SECURE_PROTOCOL: &'static str = "jsons";

    pub fn from_url(url: &ServiceUrl, secure: bool) -> Result<Self> {
        // 通常是本地服务，不限流
        let profile = ServiceProfile::default()
            .with_request_interval(Duration::ZERO)
            .with_url_overrides(url)?;
        let target = HttpTarget::from_url(url, secure, profile.request_interval)?;
        Ok(Self { profile, target })
    }

    /// 构造请求正文
    pub fn payload(&self, chunk: &Chunk, notify_type: NotifyType) -> Value {
        Value::Object(self.target.base_payload(chunk, notify_type))
    }
}

impl NotificationService for JsonService {
    fn name(&self) -> &str {
        "JSON"
    }

    fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    fn send(&self, chunk: &Chunk, notify_type: NotifyType) -> anyhow::Result<SendResult> {
        self.target
            .execute(RequestBody::Json(self.payload(chunk, notify_type)))
    }

    fn url(&self, privacy: bool) -> String {
        self.target.url(privacy, self.profile.url_parameters())
    }
}
