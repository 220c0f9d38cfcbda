// src/memory/arena.rs
//! 桶竞技场 - 按下标寻址的桶存储与空闲链表

use crate::{map::Bucket, types::BucketId};
use std::ops::{Index, IndexMut};

/// 竞技场内部统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    pub live_buckets: usize,
    pub peak_buckets: usize,
    pub allocation_count: u64,
    pub release_count: u64,
}

/// 竞技场槽位
#[derive(Debug, Default)]
struct ArenaSlot {
    generation: u32,
    bucket: Option<Bucket>,
}

/// 桶竞技场
///
/// 释放的槽位进入空闲链表，之后的分配优先复用并递增槽位代数，
/// 旧标识因此不会误指向新桶。
#[derive(Debug, Default)]
pub struct BucketArena {
    slots: Vec<ArenaSlot>,
    free_list: Vec<u32>,
    stats: ArenaStats,
}

impl BucketArena {
    /// 创建新竞技场
    pub fn new() -> Self {
        Self::default()
    }

    /// 预留指定数量的槽位
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            stats: ArenaStats::default(),
        }
    }

    /// 分配一个桶，返回其标识
    pub fn allocate(&mut self, bucket: Bucket) -> BucketId {
        let id = match self.free_list.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.generation = entry.generation.wrapping_add(1);
                entry.bucket = Some(bucket);
                BucketId::new(slot, entry.generation)
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(ArenaSlot {
                    generation: 0,
                    bucket: Some(bucket),
                });
                BucketId::new(slot, 0)
            }
        };

        self.stats.live_buckets += 1;
        self.stats.peak_buckets = self.stats.peak_buckets.max(self.stats.live_buckets);
        self.stats.allocation_count += 1;
        id
    }

    /// 释放桶，返回被释放的桶
    pub fn release(&mut self, id: BucketId) -> Option<Bucket> {
        let entry = self.slots.get_mut(id.index())?;
        if entry.generation != id.generation() {
            return None;
        }
        let bucket = entry.bucket.take()?;
        self.free_list.push(id.slot);
        self.stats.live_buckets -= 1;
        self.stats.release_count += 1;
        Some(bucket)
    }

    pub fn get(&self, id: BucketId) -> Option<&Bucket> {
        let entry = self.slots.get(id.index())?;
        if entry.generation != id.generation() {
            return None;
        }
        entry.bucket.as_ref()
    }

    pub fn get_mut(&mut self, id: BucketId) -> Option<&mut Bucket> {
        let entry = self.slots.get_mut(id.index())?;
        if entry.generation != id.generation() {
            return None;
        }
        entry.bucket.as_mut()
    }

    /// 存活的桶数量
    pub fn live_count(&self) -> usize {
        self.stats.live_buckets
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    /// 遍历所有存活的桶
    pub fn iter(&self) -> impl Iterator<Item = (BucketId, &Bucket)> {
        self.slots.iter().enumerate().filter_map(|(i, entry)| {
            entry
                .bucket
                .as_ref()
                .map(|b| (BucketId::new(i as u32, entry.generation), b))
        })
    }

    /// 清空所有桶（累计分配/释放计数保留）
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.stats.live_buckets = 0;
    }
}

impl Index<BucketId> for BucketArena {
    type Output = Bucket;

    fn index(&self, id: BucketId) -> &Bucket {
        match self.get(id) {
            Some(bucket) => bucket,
            None => panic!("悬空的桶标识: {}", id),
        }
    }
}

impl IndexMut<BucketId> for BucketArena {
    fn index_mut(&mut self, id: BucketId) -> &mut Bucket {
        match self.get_mut(id) {
            Some(bucket) => bucket,
            None => panic!("悬空的桶标识: {}", id),
        }
    }
}
