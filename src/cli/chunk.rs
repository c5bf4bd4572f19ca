//! Chunk 命令 - 在本地预览溢出处理的结果
//!
//! 不需要任何服务 URL，直接按给定的限制运行溢出处理并打印每个 chunk。

use crate::notification::{apply_overflow, Chunk, NotifyFormat, OverflowLimits, OverflowMode};
use crate::notification::overflow::{
    DEFAULT_BODY_MAXLEN, DEFAULT_DISPLAY_COUNT_THRESHOLD, DEFAULT_MAX_DISPLAY_COUNT_WIDTH,
    DEFAULT_TITLE_MAXLEN,
};
use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::Read;

/// Chunk 命令参数
#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// 消息正文（缺省时从 stdin 读取）
    #[arg(long, short)]
    pub body: Option<String>,

    /// 消息标题
    #[arg(long, short, default_value = "")]
    pub title: String,

    /// 正文最大长度
    #[arg(long, default_value_t = DEFAULT_BODY_MAXLEN)]
    pub body_maxlen: usize,

    /// 标题最大长度；0 表示不支持标题
    #[arg(long, default_value_t = DEFAULT_TITLE_MAXLEN)]
    pub title_maxlen: usize,

    /// 正文最大行数；0 表示不限制
    #[arg(long, default_value_t = 0)]
    pub max_lines: usize,

    /// 为空白预留的字符数
    #[arg(long, default_value_t = 0)]
    pub buffer: usize,

    /// 计数后缀的最大宽度
    #[arg(long, default_value_t = DEFAULT_MAX_DISPLAY_COUNT_WIDTH)]
    pub count_width: usize,

    /// 显示计数所需的最小长度
    #[arg(long, default_value_t = DEFAULT_DISPLAY_COUNT_THRESHOLD)]
    pub count_threshold: usize,

    /// 标题与正文共享 body-maxlen
    #[arg(long)]
    pub amalgamate: bool,

    /// 只在第一段显示标题（true / false，缺省自动判断）
    #[arg(long)]
    pub title_once: Option<bool>,

    /// 溢出模式: upstream, truncate, split
    #[arg(long, short, default_value = "split")]
    pub mode: String,

    /// 目标服务的格式: text, markdown, html
    #[arg(long, short, default_value = "text")]
    pub format: String,

    /// 正文格式: text, markdown, html
    #[arg(long, short = 'i')]
    pub input_format: Option<String>,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

impl ChunkArgs {
    /// 根据参数生成长度限制
    pub fn limits(&self) -> Result<OverflowLimits> {
        if self.body_maxlen == 0 {
            bail!("--body-maxlen must be greater than 0");
        }

        Ok(OverflowLimits::new(self.title_maxlen, self.body_maxlen)
            .with_body_max_line_count(self.max_lines)
            .with_overflow_buffer(self.buffer)
            .with_max_display_count_width(self.count_width)
            .with_display_count_threshold(self.count_threshold)
            .with_amalgamate_title(self.amalgamate)
            .with_display_title_once(self.title_once))
    }

    /// 运行溢出处理
    pub fn run(&self, body: &str) -> Result<Vec<Chunk>> {
        let limits = self.limits()?;
        let mode: OverflowMode = self.mode.parse()?;
        let format: NotifyFormat = self.format.parse()?;
        let input_format = self
            .input_format
            .as_deref()
            .map(str::parse::<NotifyFormat>)
            .transpose()?;

        Ok(apply_overflow(body, &self.title, &limits, mode, format, input_format))
    }
}

/// 处理 chunk 命令
pub fn handle_chunk(args: ChunkArgs) -> Result<()> {
    let body = match &args.body {
        Some(body) => body.clone(),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read message body from stdin")?;
            body
        }
    };

    let chunks = args.run(&body)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    let total = chunks.len();
    for (idx, chunk) in chunks.iter().enumerate() {
        println!(
            "--- chunk {}/{} (title {} chars, body {} chars) ---",
            idx + 1,
            total,
            chunk.title.chars().count(),
            chunk.body.chars().count()
        );
        if !chunk.title.is_empty() {
            println!("{}", chunk.title);
            println!();
        }
        println!("{}", chunk.body);
    }

    Ok(())
}
