//! 消息溢出处理 - 按服务的长度限制截断或拆分标题 + 正文
//!
//! 每个通知服务都有自己的标题 / 正文长度上限。`apply_overflow` 根据
//! 服务的 `OverflowLimits` 和 `OverflowMode` 把一条消息转换成若干个
//! 可以逐个投递的 `Chunk`：
//!
//! - `Upstream`: 不做处理，交给服务端自行截断
//! - `Truncate`: 只保留第一段
//! - `Split`: 拆分成多段，可选在标题后追加 ` [i/N]` 计数
//!
//! 长度一律按字符（Unicode scalar value）计算，不按字节。
//! 该函数是纯函数，对任何输入都返回至少一个 chunk，不会失败。

use super::format::NotifyFormat;
use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// 服务默认的正文长度上限
pub const DEFAULT_BODY_MAXLEN: usize = 32768;

/// 服务默认的标题长度上限
pub const DEFAULT_TITLE_MAXLEN: usize = 250;

/// ` [XXXX/XXXX]` 最多 12 个字符，超过则不显示计数
pub const DEFAULT_MAX_DISPLAY_COUNT_WIDTH: usize = 12;

/// 允许显示计数的最小标题长度
pub const DEFAULT_DISPLAY_COUNT_THRESHOLD: usize = 130;

/// 标题折叠进 HTML 正文时使用的标签
const TITLE_HTML_TAG: &str = "b";

/// 每段正文开头需要去掉的换行类字符
const LEADING_BREAKS: &[char] = &['\r', '\n', '\x0b', '\x0c'];

/// 折叠成 markdown 标题前需要去掉的前缀噪音
const MARKDOWN_TITLE_NOISE: &[char] = &['\r', '\n', ' ', '\t', '\x0b', '\x0c', '#', '-'];

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r*\n").expect("line break pattern is valid"));

/// 溢出模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowMode {
    /// 不拆分，由服务端处理长度限制
    #[default]
    Upstream,
    /// 截断为一段，丢弃剩余内容
    Truncate,
    /// 拆分为多段依次发送
    Split,
}

impl OverflowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverflowMode::Upstream => "upstream",
            OverflowMode::Truncate => "truncate",
            OverflowMode::Split => "split",
        }
    }
}

impl std::fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OverflowMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upstream" => Ok(OverflowMode::Upstream),
            "truncate" => Ok(OverflowMode::Truncate),
            "split" => Ok(OverflowMode::Split),
            _ => Err(ValidationError::InvalidOverflow(s.to_string())),
        }
    }
}

/// 服务的长度限制与溢出策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverflowLimits {
    /// 标题最大长度；0 表示服务不支持标题，标题会被折叠进正文
    pub title_maxlen: usize,
    /// 正文最大长度（必须大于 0）
    pub body_maxlen: usize,
    /// 正文最大行数；0 表示不限制
    pub body_max_line_count: usize,
    /// 为空白预留的字符数
    pub overflow_buffer: usize,
    /// 计数后缀允许的最大宽度
    pub overflow_max_display_count_width: usize,
    /// 显示计数所需的最小长度阈值
    pub overflow_display_count_threshold: usize,
    /// 标题和正文是否共享 `body_maxlen`
    pub amalgamate_title: bool,
    /// 拆分时是否只在第一段显示标题；None 表示自动判断
    pub display_title_once: Option<bool>,
}

impl Default for OverflowLimits {
    fn default() -> Self {
        Self {
            title_maxlen: DEFAULT_TITLE_MAXLEN,
            body_maxlen: DEFAULT_BODY_MAXLEN,
            body_max_line_count: 0,
            overflow_buffer: 0,
            overflow_max_display_count_width: DEFAULT_MAX_DISPLAY_COUNT_WIDTH,
            overflow_display_count_threshold: DEFAULT_DISPLAY_COUNT_THRESHOLD,
            amalgamate_title: false,
            display_title_once: None,
        }
    }
}

impl OverflowLimits {
    /// 创建指定标题 / 正文上限的限制，其余取默认值
    pub fn new(title_maxlen: usize, body_maxlen: usize) -> Self {
        Self {
            title_maxlen,
            body_maxlen,
            ..Self::default()
        }
    }

    pub fn with_body_max_line_count(mut self, count: usize) -> Self {
        self.body_max_line_count = count;
        self
    }

    pub fn with_overflow_buffer(mut self, buffer: usize) -> Self {
        self.overflow_buffer = buffer;
        self
    }

    pub fn with_max_display_count_width(mut self, width: usize) -> Self {
        self.overflow_max_display_count_width = width;
        self
    }

    pub fn with_display_count_threshold(mut self, threshold: usize) -> Self {
        self.overflow_display_count_threshold = threshold;
        self
    }

    pub fn with_amalgamate_title(mut self, amalgamate: bool) -> Self {
        self.amalgamate_title = amalgamate;
        self
    }

    pub fn with_display_title_once(mut self, once: Option<bool>) -> Self {
        self.display_title_once = once;
        self
    }
}

/// 一个可独立投递的消息片段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub title: String,
    pub body: String,
}

impl Chunk {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// 按服务限制处理消息溢出
///
/// `notify_format` 是目标服务的正文格式，`body_format` 是调用方声明的
/// 输入格式，两者只在标题需要折叠进正文时使用。
///
/// 返回的 chunk 序列有序且非空。
pub fn apply_overflow(
    body: &str,
    title: &str,
    limits: &OverflowLimits,
    mode: OverflowMode,
    notify_format: NotifyFormat,
    body_format: Option<NotifyFormat>,
) -> Vec<Chunk> {
    let mut title = title.trim().to_string();
    let mut body = body.trim_end().to_string();

    if limits.title_maxlen == 0 && !title.is_empty() {
        body = fold_title(&title, &body, notify_format, body_format);
        title.clear();
    }

    // 行数限制总是最先生效
    if limits.body_max_line_count > 0 {
        body = limit_lines(&body, limits.body_max_line_count);
    }

    if mode == OverflowMode::Upstream {
        return vec![Chunk::new(title, body)];
    }

    let amalgamate = limits.amalgamate_title;
    let title_len = title.chars().count();

    // 标题并入正文时需要为 \r\n 预留 2 个字符
    let overflow_buffer = if limits.title_maxlen == 0 && title_len > 0 {
        to_len(limits.overflow_buffer.max(2))
    } else {
        to_len(limits.overflow_buffer)
    };

    let title_maxlen = if amalgamate {
        title_len
            .saturating_add(limits.overflow_max_display_count_width)
            .min(limits.title_maxlen)
            .min(limits.body_maxlen)
    } else {
        limits.title_maxlen
    };

    if title_len > title_maxlen {
        title = take_chars(&title, title_maxlen).trim_end().to_string();
    }

    let title_maxlen = to_len(title_maxlen);
    let configured_body_maxlen = to_len(limits.body_maxlen);

    let mut body_maxlen = if amalgamate && configured_body_maxlen - overflow_buffer >= title_maxlen {
        let shared = if title.is_empty() {
            configured_body_maxlen
        } else {
            configured_body_maxlen - title_maxlen
        };
        shared - overflow_buffer
    } else if amalgamate {
        configured_body_maxlen - overflow_buffer
    } else {
        configured_body_maxlen
    };

    let chars: Vec<char> = body.chars().collect();
    let body_len = to_len(chars.len());

    if body_maxlen > 0 && body_len <= body_maxlen {
        return vec![Chunk::new(title, body)];
    }

    if mode == OverflowMode::Truncate {
        let truncated = window(&chars, 0, body_maxlen.max(0) as usize);
        return vec![Chunk::new(title, truncated)];
    }

    let threshold = to_len(limits.overflow_display_count_threshold);
    let display_title_once = limits
        .display_title_once
        .unwrap_or(amalgamate && body_maxlen < threshold);

    if display_title_once || body_maxlen <= 0 {
        return split_title_once(&chars, title, body_maxlen, limits.body_maxlen);
    }

    let max_count_width = to_len(limits.overflow_max_display_count_width);
    let mut show_counter = !title.is_empty()
        && body_len > body_maxlen
        && ((amalgamate && body_maxlen >= threshold) || (!amalgamate && title_maxlen > threshold))
        && title_maxlen > max_count_width.saturating_add(overflow_buffer)
        && limits.title_maxlen > limits.overflow_display_count_threshold;

    let mut count = 0;
    let mut digits = 0;
    if show_counter {
        if body_maxlen - overflow_buffer > 0 {
            body_maxlen -= overflow_buffer;

            count = (body_len as usize).div_ceil(body_maxlen as usize);
            digits = count.to_string().len();

            let count_width = 4 + 2 * digits as i64;
            if count_width <= max_count_width {
                let room = (title_maxlen - count_width) as usize;
                if title.chars().count() > room {
                    title = take_chars(&title, room);
                }
            } else {
                // 段数太多，计数放不下
                show_counter = false;
            }
        } else {
            show_counter = false;
        }
    }

    let step = body_maxlen as usize;
    (0..chars.len())
        .step_by(step)
        .enumerate()
        .map(|(idx, start)| {
            let title = if show_counter {
                format!("{} [{:0w$}/{:0w$}]", title, idx + 1, count, w = digits)
            } else {
                title.clone()
            };
            Chunk::new(title, window(&chars, start, step))
        })
        .collect()
}

/// 只在第一段显示标题，后续段按服务的完整正文长度拆分
fn split_title_once(chars: &[char], title: String, first_len: i64, continuation_len: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    let start = if first_len > 0 && !chars.is_empty() {
        let first_len = first_len as usize;
        chunks.push(Chunk::new(title, window(chars, 0, first_len)));
        first_len
    } else {
        // 标题占满了全部空间，第一段只发送标题
        chunks.push(Chunk::new(title, String::new()));
        0
    };

    if continuation_len > 0 {
        chunks.extend(
            (start..chars.len())
                .step_by(continuation_len)
                .map(|i| Chunk::new(String::new(), window(chars, i, continuation_len))),
        );
    }

    chunks
}

/// 把标题折叠进正文（服务不支持标题时）
fn fold_title(
    title: &str,
    body: &str,
    notify_format: NotifyFormat,
    body_format: Option<NotifyFormat>,
) -> String {
    match notify_format {
        NotifyFormat::Html => {
            format!("<{tag}>{title}</{tag}><br />\r\n{body}", tag = TITLE_HTML_TAG)
        }
        NotifyFormat::Markdown if body_format == Some(NotifyFormat::Text) => {
            let heading = title.trim_start_matches(MARKDOWN_TITLE_NOISE);
            if heading.is_empty() {
                body.to_string()
            } else {
                format!("# {heading}\r\n{body}")
            }
        }
        _ => format!("{title}\r\n{body}"),
    }
}

/// 只保留前 `max_lines` 行，用 \r\n 重新连接
fn limit_lines(body: &str, max_lines: usize) -> String {
    LINE_BREAK
        .split(body)
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// 长度转为 i64，超出范围时取 i64::MAX
fn to_len(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// 取 `[start, start + len)` 范围内的字符并去掉首尾空白
fn window(chars: &[char], start: usize, len: usize) -> String {
    let end = start.saturating_add(len).min(chars.len());
    let start = start.min(end);
    let slice: String = chars[start..end].iter().collect();
    slice.trim_start_matches(LEADING_BREAKS).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(body: &str, title: &str, limits: &OverflowLimits) -> Vec<Chunk> {
        apply_overflow(body, title, limits, OverflowMode::Split, NotifyFormat::Text, None)
    }

    #[test]
    fn test_upstream_passthrough() {
        let limits = OverflowLimits::new(10, 100);
        let chunks = apply_overflow("hello", "", &limits, OverflowMode::Upstream, NotifyFormat::Text, None);
        assert_eq!(chunks, vec![Chunk::new("", "hello")]);
    }

    #[test]
    fn test_upstream_ignores_lengths() {
        let limits = OverflowLimits::new(5, 10);
        let body = "x".repeat(500);
        let chunks = apply_overflow(&body, "a very long title", &limits, OverflowMode::Upstream, NotifyFormat::Text, None);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "a very long title");
        assert_eq!(chunks[0].body.len(), 500);
    }

    #[test]
    fn test_normalizes_whitespace() {
        let limits = OverflowLimits::new(10, 100);
        let chunks = apply_overflow("  body  \r\n\n", "  title \t", &limits, OverflowMode::Upstream, NotifyFormat::Text, None);
        assert_eq!(chunks, vec![Chunk::new("title", "  body")]);
    }

    #[test]
    fn test_title_folded_as_text() {
        let limits = OverflowLimits::new(0, 100);
        let chunks = apply_overflow("", "Only Title", &limits, OverflowMode::Upstream, NotifyFormat::Text, None);
        assert_eq!(chunks, vec![Chunk::new("", "Only Title\r\n")]);
    }

    #[test]
    fn test_title_folded_as_html() {
        let limits = OverflowLimits::new(0, 100);
        let chunks = apply_overflow("Disk full", "Alert", &limits, OverflowMode::Upstream, NotifyFormat::Html, None);
        assert_eq!(chunks[0].body, "<b>Alert</b><br />\r\nDisk full");
        assert_eq!(chunks[0].title, "");
    }

    #[test]
    fn test_title_folded_as_markdown_heading() {
        let limits = OverflowLimits::new(0, 100);
        let chunks = apply_overflow(
            "Disk full",
            "## Alert",
            &limits,
            OverflowMode::Upstream,
            NotifyFormat::Markdown,
            Some(NotifyFormat::Text),
        );
        assert_eq!(chunks[0].body, "# Alert\r\nDisk full");
    }

    #[test]
    fn test_markdown_heading_dropped_when_only_noise() {
        let limits = OverflowLimits::new(0, 100);
        let chunks = apply_overflow(
            "Disk full",
            "- # --",
            &limits,
            OverflowMode::Upstream,
            NotifyFormat::Markdown,
            Some(NotifyFormat::Text),
        );
        assert_eq!(chunks, vec![Chunk::new("", "Disk full")]);
    }

    #[test]
    fn test_markdown_without_text_input_folds_as_text() {
        let limits = OverflowLimits::new(0, 100);
        let chunks = apply_overflow(
            "Disk full",
            "## Alert",
            &limits,
            OverflowMode::Upstream,
            NotifyFormat::Markdown,
            Some(NotifyFormat::Markdown),
        );
        assert_eq!(chunks[0].body, "## Alert\r\nDisk full");
    }

    #[test]
    fn test_line_count_limit() {
        let limits = OverflowLimits::new(10, 100).with_body_max_line_count(2);
        let chunks = apply_overflow(
            "one\r\ntwo\nthree\r\r\nfour",
            "",
            &limits,
            OverflowMode::Upstream,
            NotifyFormat::Text,
            None,
        );
        assert_eq!(chunks[0].body, "one\r\ntwo");
    }

    #[test]
    fn test_truncate_keeps_first_window() {
        let limits = OverflowLimits::new(0, 100);
        let body = "A".repeat(250);
        let chunks = apply_overflow(&body, "", &limits, OverflowMode::Truncate, NotifyFormat::Text, None);
        assert_eq!(chunks, vec![Chunk::new("", "A".repeat(100))]);
    }

    #[test]
    fn test_truncate_strips_boundary_whitespace() {
        let limits = OverflowLimits::new(10, 6);
        let chunks = apply_overflow("hello world", "t", &limits, OverflowMode::Truncate, NotifyFormat::Text, None);
        assert_eq!(chunks, vec![Chunk::new("t", "hello")]);
    }

    #[test]
    fn test_truncate_title_to_limit() {
        let limits = OverflowLimits::new(5, 100);
        let chunks = apply_overflow("body", "abc defgh", &limits, OverflowMode::Truncate, NotifyFormat::Text, None);
        // "abc d" 右侧去空白后不变
        assert_eq!(chunks[0].title, "abc d");

        let chunks = apply_overflow("body", "abcd efgh", &limits, OverflowMode::Truncate, NotifyFormat::Text, None);
        assert_eq!(chunks[0].title, "abcd");
    }

    #[test]
    fn test_short_body_is_not_split() {
        let limits = OverflowLimits::new(0, 5);
        let chunks = split("short", "", &limits);
        assert_eq!(chunks, vec![Chunk::new("", "short")]);
    }

    #[test]
    fn test_split_repeats_title_without_counter() {
        let limits = OverflowLimits::new(10, 100).with_display_title_once(Some(false));
        let body = "A".repeat(250);
        let chunks = split(&body, "T", &limits);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.title == "T"));
        assert_eq!(chunks[0].body.len(), 100);
        assert_eq!(chunks[1].body.len(), 100);
        assert_eq!(chunks[2].body.len(), 50);
    }

    #[test]
    fn test_split_with_counter() {
        let limits = OverflowLimits::new(250, 100);
        let body = "b".repeat(1050);
        let chunks = split(&body, "My Title", &limits);

        assert_eq!(chunks.len(), 11);
        assert_eq!(chunks[0].title, "My Title [01/11]");
        assert_eq!(chunks[10].title, "My Title [11/11]");
        assert_eq!(chunks[10].body.len(), 50);
    }

    #[test]
    fn test_counter_shortens_long_title() {
        let limits = OverflowLimits::new(140, 100);
        let title = "x".repeat(140);
        let chunks = split(&"y".repeat(250), &title, &limits);

        assert_eq!(chunks.len(), 3);
        let expected = format!("{} [1/3]", "x".repeat(134));
        assert_eq!(chunks[0].title, expected);
        assert!(chunks.iter().all(|c| c.title.chars().count() <= 140));
    }

    #[test]
    fn test_counter_needs_title_maxlen_above_threshold() {
        let limits = OverflowLimits::new(130, 100);
        let chunks = split(&"y".repeat(250), "Title", &limits);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.title == "Title"));
    }

    #[test]
    fn test_counter_dropped_when_too_wide() {
        let limits = OverflowLimits::new(250, 10).with_max_display_count_width(6);
        let chunks = split(&"z".repeat(100), "Title", &limits);

        assert_eq!(chunks.len(), 10);
        assert!(chunks.iter().all(|c| c.title == "Title"));
    }

    #[test]
    fn test_counter_padding_reduces_window() {
        let limits = OverflowLimits::new(250, 100).with_overflow_buffer(10);
        let chunks = split(&"q".repeat(200), "Title", &limits);

        // 每段 90 个字符：90 + 90 + 20
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].title, "Title [1/3]");
        assert_eq!(chunks[0].body.len(), 90);
        assert_eq!(chunks[2].body.len(), 20);
    }

    #[test]
    fn test_amalgamated_split_with_counter() {
        let limits = OverflowLimits::new(250, 160).with_amalgamate_title(true);
        let chunks = split(&"a".repeat(300), "Hello", &limits);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].title, "Hello [1/3]");
        assert_eq!(chunks[0].body.len(), 143);
        assert_eq!(chunks[1].body.len(), 143);
        assert_eq!(chunks[2].body.len(), 14);
        for chunk in &chunks {
            assert!(chunk.title.len() + chunk.body.len() <= 160);
        }
    }

    #[test]
    fn test_amalgamated_title_once_detected() {
        let limits = OverflowLimits::new(250, 100).with_amalgamate_title(true);
        let chunks = split(&"a".repeat(250), "Hello", &limits);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], Chunk::new("Hello", "a".repeat(83)));
        assert_eq!(chunks[1], Chunk::new("", "a".repeat(100)));
        assert_eq!(chunks[2], Chunk::new("", "a".repeat(67)));
    }

    #[test]
    fn test_title_consumes_whole_budget() {
        let limits = OverflowLimits::new(250, 10).with_amalgamate_title(true);
        let chunks = split("abcdefghijklmnopqrstuvwxy", "A long title here", &limits);

        assert_eq!(
            chunks,
            vec![
                Chunk::new("A long tit", ""),
                Chunk::new("", "abcdefghij"),
                Chunk::new("", "klmnopqrst"),
                Chunk::new("", "uvwxy"),
            ]
        );
    }

    #[test]
    fn test_title_once_forced_on() {
        let limits = OverflowLimits::new(250, 100).with_display_title_once(Some(true));
        let chunks = split(&"c".repeat(250), "Title", &limits);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].title, "Title");
        assert!(chunks[1..].iter().all(|c| c.title.is_empty()));
    }

    #[test]
    fn test_title_once_forced_off_with_no_room() {
        let limits = OverflowLimits::new(250, 10)
            .with_amalgamate_title(true)
            .with_display_title_once(Some(false));
        let chunks = split("abcdefghijklmnopqrstuvwxy", "A long title here", &limits);

        assert_eq!(chunks[0], Chunk::new("A long tit", ""));
        assert_eq!(chunks.len(), 4);
    }

    #[test]
    fn test_empty_body_with_title() {
        let limits = OverflowLimits::new(10, 100);
        let chunks = split("", "Only Title", &limits);
        assert_eq!(chunks, vec![Chunk::new("Only Title", "")]);
    }

    #[test]
    fn test_everything_empty_still_yields_chunk() {
        let limits = OverflowLimits::new(10, 100);
        for mode in [OverflowMode::Upstream, OverflowMode::Truncate, OverflowMode::Split] {
            let chunks = apply_overflow("", "", &limits, mode, NotifyFormat::Text, None);
            assert_eq!(chunks, vec![Chunk::default()]);
        }
    }

    #[test]
    fn test_split_strips_chunk_boundaries() {
        let limits = OverflowLimits::new(10, 5).with_display_title_once(Some(false));
        let chunks = split("abcd\n\nefgh  ij", "", &limits);

        let bodies: Vec<&str> = chunks.iter().map(|c| c.body.as_str()).collect();
        // 开头只去掉换行类字符，空格保留
        assert_eq!(bodies, vec!["abcd", "efgh", "  ij"]);
    }

    #[test]
    fn test_lengths_are_counted_in_chars() {
        let limits = OverflowLimits::new(10, 4);
        let chunks = split("héllo wörld", "", &limits);

        let bodies: Vec<&str> = chunks.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["héll", "o wö", "rld"]);
    }

    #[test]
    fn test_overflow_mode_parse() {
        assert_eq!("SPLIT".parse::<OverflowMode>().unwrap(), OverflowMode::Split);
        assert_eq!("truncate".parse::<OverflowMode>().unwrap(), OverflowMode::Truncate);
        assert_eq!(
            "chop".parse::<OverflowMode>().unwrap_err(),
            ValidationError::InvalidOverflow("chop".to_string())
        );
    }

    #[test]
    fn test_unbounded_body_maxlen_fits_in_one_chunk() {
        let limits = OverflowLimits::new(250, usize::MAX);
        for mode in [OverflowMode::Truncate, OverflowMode::Split] {
            let chunks = apply_overflow("hello world", "T", &limits, mode, NotifyFormat::Text, None);
            assert_eq!(chunks, vec![Chunk::new("T", "hello world")]);
        }

        let limits = limits.with_amalgamate_title(true);
        let chunks = split("hello world", "T", &limits);
        assert_eq!(chunks, vec![Chunk::new("T", "hello world")]);
    }

    #[test]
    fn test_unbounded_count_width_is_total() {
        let body = "x".repeat(250);

        // 标题预算饱和后被 body_maxlen 截住，标题占满第一段
        let limits = OverflowLimits::new(250, 100)
            .with_amalgamate_title(true)
            .with_max_display_count_width(usize::MAX);
        let chunks = split(&body, "T", &limits);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], Chunk::new("T", ""));
        let joined: String = chunks.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(joined, body);

        // 计数宽度放不下，不显示计数
        let limits = OverflowLimits::new(250, 100).with_max_display_count_width(usize::MAX);
        let chunks = split(&body, "Title", &limits);
        let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Title", "Title", "Title"]);
    }

    #[test]
    fn test_unbounded_overflow_buffer_is_total() {
        let body = "x".repeat(250);

        let limits = OverflowLimits::new(250, 100).with_overflow_buffer(usize::MAX);
        let chunks = split(&body, "Title", &limits);
        let bodies: Vec<usize> = chunks.iter().map(|c| c.body.len()).collect();
        assert_eq!(bodies, vec![100, 100, 50]);
        assert!(chunks.iter().all(|c| c.title == "Title"));

        let limits = limits.with_amalgamate_title(true);
        let chunks = split(&body, "Title", &limits);
        assert_eq!(chunks[0], Chunk::new("Title", ""));
        let joined: String = chunks.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(joined, body);
    }
}
