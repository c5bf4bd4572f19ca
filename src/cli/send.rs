//! Send 命令 - 发送通知到一个或多个服务
//!
//! 服务 URL 来自命令行参数和配置文件；正文为空时从 stdin 读取。

use crate::config::NotifyConfig;
use crate::notification::{
    NotificationBuilder, NotificationMessage, NotifyFormat, NotifyType, OverflowMode, SendResult,
};
use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::Read;

/// Send 命令参数
#[derive(Args, Debug, Default)]
pub struct SendArgs {
    /// 服务 URL（可多个），会与配置文件中的 URL 合并
    pub urls: Vec<String>,

    /// 通知标题
    #[arg(long, short, default_value = "")]
    pub title: String,

    /// 通知正文（缺省时从 stdin 读取）
    #[arg(long, short)]
    pub body: Option<String>,

    /// 通知类型: info, success, warning, failure
    #[arg(long = "type", short = 'n')]
    pub notify_type: Option<String>,

    /// 溢出模式: upstream, truncate, split
    #[arg(long, short)]
    pub overflow: Option<String>,

    /// 正文格式: text, markdown, html
    #[arg(long, short = 'i')]
    pub input_format: Option<String>,

    /// 只打印将要发送的 chunk，不实际发送
    #[arg(long)]
    pub dry_run: bool,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// 单个服务的发送结果
#[derive(Debug, Serialize)]
pub struct SendOutput {
    pub service: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutput {
    fn from_result(service: String, result: &SendResult) -> Self {
        let (status, error) = match result {
            SendResult::Sent => ("sent", None),
            SendResult::Skipped(reason) => ("skipped", Some(reason.clone())),
            SendResult::Failed(reason) => ("failed", Some(reason.clone())),
        };
        Self {
            service,
            status: status.to_string(),
            error,
        }
    }
}

/// 合并命令行参数与配置文件，生成消息
pub fn build_message(args: &SendArgs, config: &NotifyConfig, body: String) -> Result<NotificationMessage> {
    let notify_type = match &args.notify_type {
        Some(value) => value.parse::<NotifyType>()?,
        None => config.notify_type.unwrap_or_default(),
    };

    let overflow = match &args.overflow {
        Some(value) => Some(value.parse::<OverflowMode>()?),
        None => config.overflow,
    };

    let body_format = match &args.input_format {
        Some(value) => Some(value.parse::<NotifyFormat>()?),
        None => config.body_format,
    };

    Ok(NotificationMessage {
        title: args.title.clone(),
        body,
        notify_type,
        body_format,
        overflow,
    })
}

fn read_body(args: &SendArgs) -> Result<String> {
    if let Some(body) = &args.body {
        return Ok(body.clone());
    }

    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read message body from stdin")?;
    Ok(body)
}

/// 处理 send 命令；所有服务都成功时返回 true
pub fn handle_send(args: SendArgs) -> Result<bool> {
    let config = NotifyConfig::load()?;
    let body = read_body(&args)?;
    if body.trim().is_empty() {
        bail!("Message body is empty");
    }

    let message = build_message(&args, &config, body)?;

    let dispatcher = NotificationBuilder::new()
        .urls(args.urls.iter().cloned())
        .config(&config)
        .dry_run(args.dry_run)
        .build()?;

    let results = dispatcher.notify_all(&message);
    let all_ok = results.iter().all(|(_, result)| !result.is_failure());

    let output: Vec<SendOutput> = results
        .into_iter()
        .map(|(service, result)| SendOutput::from_result(service, &result))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for entry in &output {
            match &entry.error {
                Some(error) => println!("{}: {} ({})", entry.service, entry.status, error),
                None => println!("{}: {}", entry.service, entry.status),
            }
        }
    }

    Ok(all_ok)
}
