//! 索引核心模块 - 实现可扩展哈希索引及其组件

pub mod bucket;
pub mod extendible;
pub mod snapshot;

pub use bucket::Bucket;
pub use extendible::{ExtendibleHash, ExtendibleHashConfig};
pub use snapshot::{DirectoryEntry, DirectorySnapshot, InsertReport, SnapshotEntry};

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<ExtendibleHashConfig> = Lazy::new(ExtendibleHashConfig::default);

// 预定义的桶容量常量
pub const DEFAULT_BUCKET_CAPACITY: usize = 3;
pub const MAX_BUCKET_CAPACITY: usize = 4096;
