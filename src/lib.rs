//! Rust内存可扩展哈希索引库
//!
//! 通过倍增目录（而不是整表重哈希）实现动态增长的哈希表。目录由定宽二进制键组成，
//! 多个目录键可以指向同一个固定容量的桶。
//!
//! ## 主要特性
//! - 取模哈希，目录键宽度等于全局深度
//! - 桶满时先按需倍增目录，再分裂桶并重新放置原有值
//! - 桶按竞技场索引寻址，显式表达"多键共享一个桶"
//! - 删除不合并桶、不收缩目录
//! - 快照视图、版本号和操作统计，供展示层使用
//!
//! ## 快速开始
//!
//! ```rust
//! use extendible_hashing::*;
//!
//! fn main() {
//!     // 创建默认配置的索引（全局深度2，桶容量3）
//!     let mut index = ExtendibleHash::new();
//!
//!     // 插入
//!     for value in [0, 4, 8, 12] {
//!         index.insert(value);
//!     }
//!     assert!(index.contains(12));
//!
//!     // 删除
//!     index.delete(4);
//!     assert!(!index.contains(4));
//!
//!     // 打印目录快照
//!     println!("{}", index.snapshot());
//! }
//! ```


#![warn(clippy::all)]
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod map;
pub mod memory;
pub mod stats;
pub mod sync;
pub mod version;

// 公共接口导出
pub use crate::{
    map::{
        Bucket,
        DirectoryEntry,
        DirectorySnapshot,
        ExtendibleHash,
        ExtendibleHashConfig,
        InsertReport,
        SnapshotEntry,
        DEFAULT_CONFIG,
        DEFAULT_BUCKET_CAPACITY,
        MAX_BUCKET_CAPACITY,
    },
    hash::{binary_repr, directory_key, directory_size},
    stats::{OperationRecorder, AtomicOperationStats, DisabledOperationRecorder, OperationStatsSnapshot},
    sync::SharedExtendibleHash,
    version::{VersionGuard, VersionTracker},
    error::HashError,
    types::{parse_value, BucketId, DirectoryKey, HashValue, OperationType, MAX_GLOBAL_DEPTH},
};

/// 批量插入
///
/// 返回新插入的值的个数
pub fn batch_insert(
    index: &mut ExtendibleHash,
    values: impl IntoIterator<Item = HashValue>,
) -> usize {
    values.into_iter().filter(|&value| index.insert(value)).count()
}

/// 批量删除
///
/// 返回实际被删除的值的个数
pub fn batch_delete(
    index: &mut ExtendibleHash,
    values: impl IntoIterator<Item = HashValue>,
) -> usize {
    values.into_iter().filter(|&value| index.delete(value)).count()
}
