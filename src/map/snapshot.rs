//! 目录视图 - 供展示层读取的借用视图与快照

use crate::{
    hash::binary_repr,
    map::{bucket::Bucket, extendible::ExtendibleHash},
    types::{BucketId, DirectoryKey, HashValue},
};
use ahash::AHashMap;
use std::fmt;

/// 目录项借用视图
#[derive(Debug, Clone, Copy)]
pub struct DirectoryEntry<'a> {
    pub key: DirectoryKey,
    pub bucket_id: BucketId,
    pub bucket: &'a Bucket,
}

/// 快照中的一个目录项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub key: DirectoryKey,
    pub bucket: BucketId,
    pub local_depth: u8,
    pub values: Vec<HashValue>,
}

/// 目录快照
///
/// 目录项按目录键升序排列。共享同一个桶的目录项有相同的 `bucket` 标识。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub global_depth: u8,
    pub version: u64,
    pub entries: Vec<SnapshotEntry>,
}

impl DirectorySnapshot {
    /// 给每个不同的桶分配标签序号，按目录键顺序首次出现的先后编号
    pub fn bucket_labels(&self) -> AHashMap<BucketId, usize> {
        let mut labels = AHashMap::new();
        for entry in &self.entries {
            let next = labels.len();
            labels.entry(entry.bucket).or_insert(next);
        }
        labels
    }

    /// 不同桶的个数
    pub fn distinct_buckets(&self) -> usize {
        self.bucket_labels().len()
    }

    pub fn entry(&self, key: DirectoryKey) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// 索引在快照之后是否被修改过
    pub fn is_stale(&self, index: &ExtendibleHash) -> bool {
        self.version != index.version()
    }
}

impl fmt::Display for DirectorySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Global Depth: {}", self.global_depth)?;

        let labels = self.bucket_labels();
        for entry in &self.entries {
            let values = entry
                .values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                f,
                "{} → B{} (LD: {}) [{}]",
                entry.key, labels[&entry.bucket], entry.local_depth, values
            )?;
        }
        Ok(())
    }
}

/// 插入报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReport {
    pub value: HashValue,
    /// 完整二进制表示
    pub full_binary: String,
    /// 插入前的目录键
    pub key: DirectoryKey,
    /// 插入后的全局深度
    pub global_depth: u8,
    pub inserted: bool,
}

impl InsertReport {
    pub(crate) fn new(value: HashValue, key: DirectoryKey, global_depth: u8, inserted: bool) -> Self {
        Self {
            value,
            full_binary: binary_repr(value),
            key,
            global_depth,
            inserted,
        }
    }
}

impl fmt::Display for InsertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inserted {} → {}", self.value, self.key)
    }
}
