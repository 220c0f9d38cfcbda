//! 共享索引 - 在外部互斥下跨线程使用索引
//!
//! 索引本身是单线程结构；这里用读写锁把整次操作串行化，读操作可以并发。

use crate::{
    error::HashError,
    log_warn,
    map::{DirectorySnapshot, ExtendibleHash, ExtendibleHashConfig, InsertReport},
    stats::OperationStatsSnapshot,
    types::{parse_value, HashValue},
};
use parking_lot::RwLock;
use std::sync::Arc;

/// 可克隆的共享索引句柄
#[derive(Clone, Default)]
pub struct SharedExtendibleHash {
    inner: Arc<RwLock<ExtendibleHash>>,
}

impl SharedExtendibleHash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtendibleHashConfig) -> Result<Self, HashError> {
        Ok(Self::from_index(ExtendibleHash::with_config(config)?))
    }

    pub fn from_index(index: ExtendibleHash) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn insert(&self, value: HashValue) -> bool {
        self.inner.write().insert(value)
    }

    pub fn insert_with_report(&self, value: HashValue) -> InsertReport {
        self.inner.write().insert_with_report(value)
    }

    pub fn delete(&self, value: HashValue) -> bool {
        self.inner.write().delete(value)
    }

    /// 解析原始文本后插入
    pub fn insert_str(&self, input: &str) -> Result<InsertReport, HashError> {
        let value = Self::parse(input)?;
        Ok(self.insert_with_report(value))
    }

    /// 解析原始文本后删除
    pub fn delete_str(&self, input: &str) -> Result<bool, HashError> {
        let value = Self::parse(input)?;
        Ok(self.delete(value))
    }

    fn parse(input: &str) -> Result<HashValue, HashError> {
        parse_value(input).map_err(|err| {
            log_warn!("输入校验失败: {}", err);
            err
        })
    }

    pub fn contains(&self, value: HashValue) -> bool {
        self.inner.read().contains(value)
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        self.inner.read().snapshot()
    }

    pub fn global_depth(&self) -> u8 {
        self.inner.read().global_depth()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> OperationStatsSnapshot {
        self.inner.read().stats()
    }

    /// 持读锁执行只读操作
    pub fn read<R>(&self, f: impl FnOnce(&ExtendibleHash) -> R) -> R {
        f(&self.inner.read())
    }

    /// 持写锁执行一组操作，期间其它线程看不到中间状态
    pub fn write<R>(&self, f: impl FnOnce(&mut ExtendibleHash) -> R) -> R {
        f(&mut self.inner.write())
    }
}
