//! Form 服务（form:// 和 forms://） - 以 application/x-www-form-urlencoded 提交

use super::http::{HttpTarget, RequestBody};
use crate::error::Result;
use crate::notification::notify_type::NotifyType;
use crate::notification::overflow::Chunk;
use crate::notification::service::{NotificationService, SendResult, ServiceProfile};
use crate::notification::service_url::ServiceUrl;
use serde_json::Value;
use std::time::Duration;

/// Form 服务
#[derive(Debug)]
pub struct FormService {
    profile: ServiceProfile,
    target: HttpTarget,
}

impl FormService {
    pub const PROTOCOL: &'static str = "form";
    pub const SECURE_PROTOCOL: &'static str = "forms";

    pub fn from_url(url: &ServiceUrl, secure: bool) -> Result<Self> {
        let profile = ServiceProfile::default()
            .with_request_interval(Duration::ZERO)
            .with_url_overrides(url)?;
        let target = HttpTarget::from_url(url, secure, profile.request_interval)?;
        Ok(Self { profile, target })
    }

    /// 表单字段
    pub fn fields(&self, chunk: &Chunk, notify_type: NotifyType) -> Vec<(String, String)> {
        self.target
            .base_payload(chunk, notify_type)
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect()
    }
}

impl NotificationService for FormService {
    fn name(&self) -> &str {
        "Form"
    }

    fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    fn send(&self, chunk: &Chunk, notify_type: NotifyType) -> anyhow::Result<SendResult> {
        self.target
            .execute(RequestBody::Form(self.fields(chunk, notify_type)))
    }

    fn url(&self, privacy: bool) -> String {
        self.target.url(privacy, self.profile.url_parameters())
    }
}
