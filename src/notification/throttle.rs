//! 请求限流 - 控制同一服务两次请求之间的最小间隔

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// 请求限流器
///
/// 第一次请求不等待；之后每次请求前等待到距上次请求满 `interval` 为止。
#[derive(Debug)]
pub struct RequestThrottle {
    /// 两次请求之间的最小间隔
    interval: Duration,
    /// 上一次请求的时间
    last_io: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    /// 创建新的限流器；间隔为 0 表示不限流
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_io: Mutex::new(None),
        }
    }

    /// 计算现在需要等待的时长（不更新状态）
    pub fn remaining(&self, now: Instant) -> Duration {
        let last_io = match self.last_io.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        };

        match last_io {
            Some(last) if !self.interval.is_zero() => {
                self.interval.saturating_sub(now.saturating_duration_since(last))
            }
            _ => Duration::ZERO,
        }
    }

    /// 等待到允许下一次请求，然后记录本次请求时间
    pub fn wait(&self) {
        let pending = self.remaining(Instant::now());
        if !pending.is_zero() {
            debug!(wait_ms = pending.as_millis() as u64, "Throttling request");
            std::thread::sleep(pending);
        }
        self.mark(Instant::now());
    }

    /// 记录一次请求
    pub fn mark(&self, at: Instant) {
        match self.last_io.lock() {
            Ok(mut guard) => *guard = Some(at),
            Err(poisoned) => *poisoned.into_inner() = Some(at),
        }
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
