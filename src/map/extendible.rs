//! 可扩展哈希索引核心实现

use crate::{
    error::HashError,
    hash::{directory_key, directory_size},
    log_debug, log_info,
    map::{
        bucket::Bucket,
        snapshot::{DirectoryEntry, DirectorySnapshot, InsertReport, SnapshotEntry},
        DEFAULT_BUCKET_CAPACITY, DEFAULT_CONFIG, MAX_BUCKET_CAPACITY,
    },
    memory::{ArenaStats, BucketArena},
    stats::{self, OperationRecorder, OperationStatsSnapshot},
    types::{BucketId, DirectoryKey, HashValue, OperationType, MAX_GLOBAL_DEPTH},
    version::{VersionGuard, VersionTracker},
};
use ahash::AHashMap;
use std::{fmt, sync::Arc, time::Instant};

/// 索引配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendibleHashConfig {
    // 每个桶最多保存的值个数
    pub bucket_capacity: usize,
    pub initial_global_depth: u8,
    pub initial_local_depth: u8,
    pub record_stats: bool,
}

impl Default for ExtendibleHashConfig {
    fn default() -> Self {
        Self {
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
            initial_global_depth: 2,
            initial_local_depth: 1,
            record_stats: true,
        }
    }
}

impl ExtendibleHashConfig {
    /// 校验配置
    pub fn validate(&self) -> Result<(), HashError> {
        if self.bucket_capacity == 0 {
            return Err(HashError::InvalidConfig {
                reason: "bucket_capacity必须大于0".into(),
            });
        }
        if self.bucket_capacity > MAX_BUCKET_CAPACITY {
            return Err(HashError::InvalidConfig {
                reason: format!(
                    "bucket_capacity不能超过{} (当前: {})",
                    MAX_BUCKET_CAPACITY, self.bucket_capacity
                ),
            });
        }
        if self.initial_global_depth > MAX_GLOBAL_DEPTH {
            return Err(HashError::InvalidConfig {
                reason: format!(
                    "initial_global_depth不能超过{} (当前: {})",
                    MAX_GLOBAL_DEPTH, self.initial_global_depth
                ),
            });
        }
        if self.initial_local_depth > self.initial_global_depth {
            return Err(HashError::InvalidConfig {
                reason: format!(
                    "initial_local_depth ({}) 不能大于 initial_global_depth ({})",
                    self.initial_local_depth, self.initial_global_depth
                ),
            });
        }
        Ok(())
    }
}

/// 可扩展哈希索引
///
/// 目录是按目录键整数值下标的桶标识数组，多个下标可以指向同一个桶。
/// 单线程使用；跨线程共享时用 [`crate::SharedExtendibleHash`]。
pub struct ExtendibleHash {
    config: ExtendibleHashConfig,
    global_depth: u8,
    directory: Vec<BucketId>,
    arena: BucketArena,
    len: usize,
    version: VersionTracker,
    stats: Arc<dyn OperationRecorder>,
}

impl ExtendibleHash {
    /// 使用默认配置创建索引
    pub fn new() -> Self {
        let config = DEFAULT_CONFIG.clone();
        let stats = stats::recorder(config.record_stats);
        Self::build(config, stats)
    }

    /// 使用自定义配置创建索引
    pub fn with_config(config: ExtendibleHashConfig) -> Result<Self, HashError> {
        let stats = stats::recorder(config.record_stats);
        Self::with_recorder(config, stats)
    }

    /// 使用自定义配置和统计记录器创建索引
    pub fn with_recorder(
        config: ExtendibleHashConfig,
        stats: Arc<dyn OperationRecorder>,
    ) -> Result<Self, HashError> {
        config.validate()?;
        Ok(Self::build(config, stats))
    }

    fn build(config: ExtendibleHashConfig, stats: Arc<dyn OperationRecorder>) -> Self {
        let mut index = Self {
            config,
            global_depth: 0,
            directory: Vec::new(),
            arena: BucketArena::new(),
            len: 0,
            version: VersionTracker::new(),
            stats,
        };
        index.initialize();
        index
    }

    /// 建立初始目录：每个目录键一个独立的空桶
    fn initialize(&mut self) {
        let global_depth = self.config.initial_global_depth;
        let local_depth = self.config.initial_local_depth;
        let capacity = self.config.bucket_capacity;

        self.arena.clear();
        let arena = &mut self.arena;
        let directory: Vec<BucketId> = (0..directory_size(global_depth))
            .map(|_| arena.allocate(Bucket::new(local_depth, capacity)))
            .collect();

        self.directory = directory;
        self.global_depth = global_depth;
        self.len = 0;
    }

    /// 计算值当前的目录键
    pub fn hash(&self, value: HashValue) -> DirectoryKey {
        directory_key(value, self.global_depth)
    }

    /// 插入值
    ///
    /// 目标桶已满时按需倍增目录、分裂桶，然后重新放置，直到值落入有空位的桶。
    /// 返回值集合是否发生变化（已存在的值返回 `false`）。
    pub fn insert(&mut self, value: HashValue) -> bool {
        let start = Instant::now();
        let before = self.len;
        let mut changed = false;

        // 栈顶先处理：分裂出的旧值在触发分裂的值之前重新放置
        let mut pending = vec![value];
        while let Some(current) = pending.pop() {
            changed |= self.place(current, &mut pending);
        }

        if changed {
            self.version.increment();
        }
        let added = self.len > before;
        self.stats.record(OperationType::Insert, start.elapsed(), added);
        added
    }

    /// 插入值并返回展示用的报告
    ///
    /// 报告中的目录键是插入前按当时全局深度计算的。
    pub fn insert_with_report(&mut self, value: HashValue) -> InsertReport {
        let key = self.hash(value);
        let inserted = self.insert(value);
        InsertReport::new(value, key, self.global_depth, inserted)
    }

    /// 放置单个值，返回索引是否被修改
    fn place(&mut self, value: HashValue, pending: &mut Vec<HashValue>) -> bool {
        let id = self.directory[self.hash(value).index()];
        let bucket = &mut self.arena[id];

        if bucket.contains(value) {
            return false;
        }
        if !bucket.is_full() {
            bucket.insert(value);
            self.len += 1;
            return true;
        }

        if bucket.local_depth() == self.global_depth {
            self.grow();
        }
        pending.push(value);
        self.split(id, pending);
        true
    }

    /// 目录倍增
    ///
    /// 旧键 `k` 变成 `0k` 和 `1k`，两者都指向 `k` 原来的桶。`0k` 的下标与 `k` 相同，
    /// `1k` 的下标是 `k + 2^旧深度`，所以直接把数组复制一份接在后面。
    fn grow(&mut self) {
        debug_assert!(self.global_depth < MAX_GLOBAL_DEPTH, "全局深度已达上限");

        self.directory.extend_from_within(..);
        self.global_depth += 1;
        self.stats.record_count(OperationType::Grow);

        log_debug!(
            "目录倍增: 全局深度 {} -> {}, 目录大小 {}",
            self.global_depth - 1,
            self.global_depth,
            self.directory.len()
        );
    }

    /// 分裂桶
    ///
    /// 扫描整个目录，把指向 `old_id` 的键按新局部深度对应的那一位分到两个新桶，
    /// 旧值压回待放置栈。没有任何键落到的一侧不会分配桶。
    fn split(&mut self, old_id: BucketId, pending: &mut Vec<HashValue>) {
        let old = &mut self.arena[old_id];
        let depth = old.local_depth() + 1;
        let former = old.take_values();
        self.len -= former.len();

        let capacity = self.config.bucket_capacity;
        let mut low: Option<BucketId> = None;
        let mut high: Option<BucketId> = None;

        for slot in 0..self.directory.len() {
            if self.directory[slot] != old_id {
                continue;
            }
            let key = DirectoryKey::new(slot as u32, self.global_depth);
            let side = if key.bit_from_end(depth) { &mut high } else { &mut low };
            let arena = &mut self.arena;
            let target = *side.get_or_insert_with(|| arena.allocate(Bucket::new(depth, capacity)));
            self.directory[slot] = target;
        }

        self.arena.release(old_id);
        self.stats.record_count(OperationType::Split);

        log_debug!(
            "桶分裂: {} -> 低位 {:?}, 高位 {:?}, 局部深度 {}, 重新放置 {} 个值",
            old_id,
            low,
            high,
            depth,
            former.len()
        );

        pending.extend(former.into_iter().rev());
    }

    /// 删除值，不存在时什么也不做
    ///
    /// 不合并桶，也不收缩目录，深度只增不减。
    pub fn delete(&mut self, value: HashValue) -> bool {
        let start = Instant::now();
        let id = self.directory[self.hash(value).index()];
        let removed = self.arena[id].delete(value);

        if removed {
            self.len -= 1;
            self.version.increment();
        }
        self.stats.record(OperationType::Delete, start.elapsed(), removed);
        removed
    }

    /// 查询值是否存在
    pub fn contains(&self, value: HashValue) -> bool {
        let start = Instant::now();
        let found = self.bucket_of(value).contains(value);
        self.stats.record(OperationType::Lookup, start.elapsed(), found);
        found
    }

    /// 值当前应在的桶
    pub fn bucket_of(&self, value: HashValue) -> &Bucket {
        &self.arena[self.directory[self.hash(value).index()]]
    }

    /// 重置为初始配置
    pub fn reset(&mut self) {
        self.initialize();
        self.version.increment();
        self.stats.record_count(OperationType::Reset);

        log_info!(
            "索引已重置: 全局深度 {}, 目录大小 {}",
            self.global_depth,
            self.directory.len()
        );
    }

    pub fn global_depth(&self) -> u8 {
        self.global_depth
    }

    /// 目录键个数
    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    /// 可达的桶个数
    pub fn bucket_count(&self) -> usize {
        self.arena.live_count()
    }

    /// 已保存的值个数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn config(&self) -> &ExtendibleHashConfig {
        &self.config
    }

    /// 所有已保存的值（按桶分组，顺序不保证）
    pub fn values(&self) -> impl Iterator<Item = HashValue> + '_ {
        self.arena
            .iter()
            .flat_map(|(_, bucket)| bucket.values().iter().copied())
    }

    /// 按目录键顺序遍历目录
    pub fn entries(&self) -> impl Iterator<Item = DirectoryEntry<'_>> + '_ {
        self.directory.iter().enumerate().map(move |(slot, &id)| DirectoryEntry {
            key: DirectoryKey::new(slot as u32, self.global_depth),
            bucket_id: id,
            bucket: &self.arena[id],
        })
    }

    /// 生成目录快照
    pub fn snapshot(&self) -> DirectorySnapshot {
        let entries = self
            .entries()
            .map(|entry| SnapshotEntry {
                key: entry.key,
                bucket: entry.bucket_id,
                local_depth: entry.bucket.local_depth(),
                values: entry.bucket.values().to_vec(),
            })
            .collect();

        DirectorySnapshot {
            global_depth: self.global_depth,
            version: self.version.current_version(),
            entries,
        }
    }

    /// 当前版本号，每次修改后递增
    pub fn version(&self) -> u64 {
        self.version.current_version()
    }

    /// 开始一次读取，之后可用 [`ExtendibleHash::validate`] 检查期间是否有修改
    pub fn begin_read(&self) -> VersionGuard {
        self.version.begin_operation(OperationType::Lookup)
    }

    pub fn validate(&self, guard: &VersionGuard) -> bool {
        self.version.validate(guard)
    }

    /// 操作统计快照
    pub fn stats(&self) -> OperationStatsSnapshot {
        self.stats.snapshot()
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = self.stats.export_prometheus();
        if output.is_empty() {
            return output;
        }
        output.push_str("# HELP extendible_global_depth Current global depth\n");
        output.push_str("# TYPE extendible_global_depth gauge\n");
        output.push_str(&format!("extendible_global_depth {}\n", self.global_depth));
        output.push_str("# HELP extendible_bucket_count Reachable buckets\n");
        output.push_str("# TYPE extendible_bucket_count gauge\n");
        output.push_str(&format!("extendible_bucket_count {}\n", self.bucket_count()));
        output
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// 检查目录与桶的结构不变式
    pub fn check_invariants(&self) -> Result<(), String> {
        let gd = self.global_depth;
        if self.directory.len() != directory_size(gd) {
            return Err(format!(
                "目录大小 {} 与全局深度 {} 不符",
                self.directory.len(),
                gd
            ));
        }

        let mut references: AHashMap<BucketId, Vec<u32>> = AHashMap::new();
        for (slot, &id) in self.directory.iter().enumerate() {
            references.entry(id).or_default().push(slot as u32);
        }

        if references.len() != self.arena.live_count() {
            return Err(format!(
                "存活桶 {} 个，但目录只引用了 {} 个",
                self.arena.live_count(),
                references.len()
            ));
        }

        let mut total = 0;
        for (&id, slots) in references.iter() {
            let bucket = self
                .arena
                .get(id)
                .ok_or_else(|| format!("目录引用了已释放的桶 {}", id))?;
            let ld = bucket.local_depth();

            if ld > gd {
                return Err(format!("桶 {} 局部深度 {} 大于全局深度 {}", id, ld, gd));
            }
            if bucket.len() > bucket.capacity() {
                return Err(format!("桶 {} 超出容量: {:?}", id, bucket));
            }

            let expected = 1usize << (gd - ld);
            if slots.len() > expected
                || (ld >= self.config.initial_global_depth && slots.len() != expected)
            {
                return Err(format!(
                    "桶 {} (局部深度 {}) 被 {} 个目录键引用，应为 {}",
                    id,
                    ld,
                    slots.len(),
                    expected
                ));
            }

            let low_bits = DirectoryKey::new(slots[0], ld).bits();
            if let Some(&slot) = slots.iter().find(|&&s| DirectoryKey::new(s, ld).bits() != low_bits) {
                return Err(format!(
                    "桶 {} 的目录键 {} 与 {} 低 {} 位不一致",
                    id,
                    DirectoryKey::new(slot, gd),
                    DirectoryKey::new(slots[0], gd),
                    ld
                ));
            }

            for &value in bucket.values() {
                if self.directory[self.hash(value).index()] != id {
                    return Err(format!("值 {} 存放在桶 {}，但哈希到别的桶", value, id));
                }
            }
            total += bucket.len();
        }

        if total != self.len {
            return Err(format!("计数 {} 与桶内值总数 {} 不符", self.len, total));
        }
        Ok(())
    }
}

impl Default for ExtendibleHash {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExtendibleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendibleHash")
            .field("global_depth", &self.global_depth)
            .field("directory_len", &self.directory.len())
            .field("bucket_count", &self.bucket_count())
            .field("len", &self.len)
            .finish()
    }
}
