//! 统计模块 - 索引操作指标

pub mod operation;

use std::sync::Arc;

pub use operation::{
    AtomicOperationStats, DisabledOperationRecorder, OperationRecorder, OperationStatsSnapshot,
};

/// 根据开关创建统计记录器
pub fn recorder(enabled: bool) -> Arc<dyn OperationRecorder> {
    if enabled {
        Arc::new(AtomicOperationStats::new())
    } else {
        Arc::new(DisabledOperationRecorder)
    }
}
