//! 配置文件 - ~/.config/notify-overflow/config.json
//!
//! ```json
//! {
//!   "urls": ["jsons://example.com/hook?overflow=split"],
//!   "overflow": "split",
//!   "notify_type": "info",
//!   "body_format": "text"
//! }
//! ```
//!
//! 所有字段都是可选的；文件不存在时使用默认值。
//! 环境变量 `NFO_CONFIG` 可以指定其他路径。

use crate::notification::{NotifyFormat, NotifyType, OverflowMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "NFO_CONFIG";

/// 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// 服务 URL 列表
    pub urls: Vec<String>,
    /// 覆盖所有服务的溢出模式
    pub overflow: Option<OverflowMode>,
    /// 默认通知类型
    pub notify_type: Option<NotifyType>,
    /// 输入正文格式
    pub body_format: Option<NotifyFormat>,
}

impl NotifyConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::home_dir().map(|home| home.join(".config/notify-overflow/config.json"))
    }

    /// 从默认路径加载
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 从指定路径加载；文件不存在时返回默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: NotifyConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        debug!(path = %path.display(), urls = config.urls.len(), "Loaded config");
        Ok(config)
    }
}
