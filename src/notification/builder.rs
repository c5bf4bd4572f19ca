//! 通知系统构建器 - 根据服务 URL 创建分发器

use super::dispatcher::NotificationDispatcher;
use super::registry;
use crate::config::NotifyConfig;
use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// 通知系统构建器
#[derive(Debug, Default)]
pub struct NotificationBuilder {
    urls: Vec<String>,
    dry_run: bool,
}

impl NotificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加服务 URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }

    /// 批量添加服务 URL
    pub fn urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls.extend(urls.into_iter().map(Into::into));
        self
    }

    /// 添加配置文件中的服务 URL
    pub fn config(self, config: &NotifyConfig) -> Self {
        self.urls(config.urls.iter().cloned())
    }

    /// 设置 dry-run 模式
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 构建 NotificationDispatcher；无效的 URL 会被跳过
    pub fn build(self) -> Result<NotificationDispatcher> {
        let mut dispatcher = NotificationDispatcher::new().with_dry_run(self.dry_run);

        for url in &self.urls {
            match registry::instantiate(url) {
                Ok(service) => {
                    info!(service = service.name(), "Loaded notification service");
                    dispatcher.register_service(Arc::from(service));
                }
                Err(e) => {
                    warn!(error = %e, "Skipping invalid notification URL");
                }
            }
        }

        if dispatcher.service_count() == 0 {
            bail!("No valid notification services were specified");
        }

        Ok(dispatcher)
    }
}
