//! 版本跟踪器 - 让读者判断自己持有的视图是否过期

use crate::types::OperationType;
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// 版本保护器 - 记录读取开始时的版本号
#[derive(Debug, Clone)]
pub struct VersionGuard {
    version: u64,
    start_time: Instant,
    operation_type: OperationType,
}

impl VersionGuard {
    /// 创建新版本保护器
    pub fn new(version: u64, operation_type: OperationType) -> Self {
        Self {
            version,
            start_time: Instant::now(),
            operation_type,
        }
    }

    /// 获取开始时的版本号
    pub fn version(&self) -> u64 {
        self.version
    }

    /// 获取已耗时
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 获取操作类型
    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    /// 验证版本是否仍然有效
    pub fn is_valid(&self, current_version: u64) -> bool {
        self.version == current_version
    }
}

/// 版本跟踪器
///
/// 每次改变索引内容或结构的写操作结束时递增。
pub struct VersionTracker {
    version: AtomicU64,
    increment_count: AtomicU64,
}

impl VersionTracker {
    /// 创建新版本跟踪器
    pub fn new() -> Self {
        Self {
            version: AtomicU64::new(0),
            increment_count: AtomicU64::new(0),
        }
    }

    /// 开始一个读操作
    pub fn begin_operation(&self, operation_type: OperationType) -> VersionGuard {
        VersionGuard::new(self.current_version(), operation_type)
    }

    /// 验证读操作期间版本未变
    pub fn validate(&self, guard: &VersionGuard) -> bool {
        guard.is_valid(self.current_version())
    }

    /// 递增版本号（在写操作结束时调用）
    pub fn increment(&self) {
        self.version.fetch_add(1, Ordering::Release);
        self.increment_count.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取当前版本号
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl Default for VersionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VersionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionTracker")
            .field("version", &self.version.load(Ordering::Relaxed))
            .field("increment_count", &self.increment_count.load(Ordering::Relaxed))
            .finish()
    }
}
