//! 通知分发器 - 管理多个服务并依次发送消息

use super::service::{NotificationMessage, NotificationService, SendResult};
use std::sync::Arc;
use tracing::{info, warn};

/// 通知分发器 - 管理多个服务并依次发送消息
pub struct NotificationDispatcher {
    /// 所有注册的服务
    services: Vec<Arc<dyn NotificationService>>,
    /// 是否为 dry-run 模式
    dry_run: bool,
}

impl NotificationDispatcher {
    /// 创建新的分发器
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
            dry_run: false,
        }
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 注册服务
    pub fn register_service(&mut self, service: Arc<dyn NotificationService>) {
        info!(service = service.name(), url = %service.url(true), "Registering notification service");
        self.services.push(service);
    }

    /// 依次发送消息到所有服务
    pub fn notify_all(&self, message: &NotificationMessage) -> Vec<(String, SendResult)> {
        let mut results = Vec::new();

        for service in &self.services {
            let name = service.name().to_string();

            if self.dry_run {
                match service.build_send_calls(message) {
                    Ok(chunks) => {
                        for (idx, chunk) in chunks.iter().enumerate() {
                            info!(
                                service = %name,
                                chunk = idx + 1,
                                total = chunks.len(),
                                title = %chunk.title,
                                body_len = chunk.body.chars().count(),
                                "[DRY-RUN] Would send chunk"
                            );
                        }
                        results.push((name, SendResult::Skipped("dry-run".to_string())));
                    }
                    Err(e) => {
                        warn!(service = %name, error = %e, "[DRY-RUN] Notification rejected");
                        results.push((name, SendResult::Failed(e.to_string())));
                    }
                }
                continue;
            }

            let result = if service.notify(message) {
                SendResult::Sent
            } else {
                SendResult::Failed(format!("{} notification failed", name))
            };

            results.push((name, result));
        }

        results
    }

    /// 所有服务都没有失败时返回 true
    pub fn notify(&self, message: &NotificationMessage) -> bool {
        self.notify_all(message)
            .iter()
            .all(|(_, result)| !result.is_failure())
    }

    /// 获取已注册的服务数量
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// 获取已注册的服务名称
    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name()).collect()
    }
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
