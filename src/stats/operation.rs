// src/stats/operation.rs
//! 操作统计 - 跟踪索引操作次数和结构调整

use crate::types::OperationType;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录一次带耗时的操作
    fn record(&self, op_type: OperationType, duration: Duration, changed: bool);
    /// 只记录次数
    fn record_count(&self, op_type: OperationType);
    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub delete_count: u64,
    pub lookup_count: u64,
    pub split_count: u64,
    pub grow_count: u64,
    pub reset_count: u64,
    /// 没有改变索引内容的写操作（重复插入、删除不存在的值）
    pub noop_count: u64,
    pub total_duration: u64, // 纳秒
}

impl OperationStatsSnapshot {
    pub fn count(&self, op_type: OperationType) -> u64 {
        match op_type {
            OperationType::Insert => self.insert_count,
            OperationType::Delete => self.delete_count,
            OperationType::Lookup => self.lookup_count,
            OperationType::Split => self.split_count,
            OperationType::Grow => self.grow_count,
            OperationType::Reset => self.reset_count,
        }
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    delete_count: AtomicU64,
    lookup_count: AtomicU64,
    split_count: AtomicU64,
    grow_count: AtomicU64,
    reset_count: AtomicU64,
    noop_count: AtomicU64,
    total_duration: AtomicU64, // 纳秒
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Delete => &self.delete_count,
            OperationType::Lookup => &self.lookup_count,
            OperationType::Split => &self.split_count,
            OperationType::Grow => &self.grow_count,
            OperationType::Reset => &self.reset_count,
        }
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType, duration: Duration, changed: bool) {
        let nanos = duration.as_nanos() as u64;

        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
        self.total_duration.fetch_add(nanos, Ordering::Relaxed);

        if op_type.is_write() && !changed {
            self.noop_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_count(&self, op_type: OperationType) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            delete_count: self.delete_count.load(Ordering::Relaxed),
            lookup_count: self.lookup_count.load(Ordering::Relaxed),
            split_count: self.split_count.load(Ordering::Relaxed),
            grow_count: self.grow_count.load(Ordering::Relaxed),
            reset_count: self.reset_count.load(Ordering::Relaxed),
            noop_count: self.noop_count.load(Ordering::Relaxed),
            total_duration: self.total_duration.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        for op in OperationType::ALL {
            self.counter(op).store(0, Ordering::Relaxed);
        }
        self.noop_count.store(0, Ordering::Relaxed);
        self.total_duration.store(0, Ordering::Relaxed);
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();

        for op in OperationType::ALL {
            let count = self.counter(op).load(Ordering::Relaxed);

            output.push_str(&format!(
                "# HELP extendible_operation_{}_count Total {} operations\n",
                op.as_str(), op.as_str()
            ));
            output.push_str(&format!(
                "# TYPE extendible_operation_{}_count counter\n",
                op.as_str()
            ));
            output.push_str(&format!(
                "extendible_operation_{}_count {}\n",
                op.as_str(), count
            ));
        }

        // 添加总持续时间和空操作计数
        output.push_str("# HELP extendible_operation_total_duration Total operation duration (ns)\n");
        output.push_str("# TYPE extendible_operation_total_duration counter\n");
        output.push_str(&format!(
            "extendible_operation_total_duration {}\n",
            self.total_duration.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP extendible_operation_noop_count Writes that left the index unchanged\n");
        output.push_str("# TYPE extendible_operation_noop_count counter\n");
        output.push_str(&format!(
            "extendible_operation_noop_count {}\n",
            self.noop_count.load(Ordering::Relaxed)
        ));

        output
    }
}

/// 禁用操作统计实现
#[derive(Debug, Default)]
pub struct DisabledOperationRecorder;

impl OperationRecorder for DisabledOperationRecorder {
    fn record(&self, _op_type: OperationType, _duration: Duration, _changed: bool) {}
    fn record_count(&self, _op_type: OperationType) {}
    fn snapshot(&self) -> OperationStatsSnapshot { OperationStatsSnapshot::default() }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String { String::new() }
}
