//! 核心类型定义 - 值、目录键、桶标识和操作类型

use core::fmt;

use crate::error::HashError;

/// 索引中存放的值 - 有界非负整数
pub type HashValue = u32;

/// 全局深度上限，等于值域的位宽
///
/// 全局深度达到32时每个目录键只对应一个可能的值，所以容量至少为1的桶不会再溢出。
pub const MAX_GLOBAL_DEPTH: u8 = HashValue::BITS as u8;

/// 低 `width` 位掩码
#[inline]
pub(crate) const fn low_mask(width: u8) -> u32 {
    if width >= MAX_GLOBAL_DEPTH {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// 目录键 - 定宽二进制串
///
/// 用整数加位宽表示，相等比较就是整数比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectoryKey {
    bits: u32,
    width: u8,
}

impl DirectoryKey {
    /// 创建目录键 (只保留低 `width` 位)
    pub const fn new(bits: u32, width: u8) -> Self {
        Self {
            bits: bits & low_mask(width),
            width,
        }
    }

    /// 获取键的整数值
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// 获取键的位宽
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// 目录数组下标
    pub const fn index(&self) -> usize {
        self.bits as usize
    }

    /// 从末尾数第 `position` 位（1 为最低位）是否为1
    pub fn bit_from_end(&self, position: u8) -> bool {
        debug_assert!(position >= 1 && position <= self.width, "位置越界: {position}");
        (self.bits >> (position - 1)) & 1 == 1
    }

    /// 在最高位前加一位，得到宽度加一的新键
    pub fn with_prefix(&self, high: bool) -> Self {
        let prefix = if high { 1u32 << self.width } else { 0 };
        Self::new(self.bits | prefix, self.width + 1)
    }
}

impl fmt::Display for DirectoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.bits, width = self.width as usize)
    }
}

/// 桶标识 - 竞技场下标加代数
///
/// 槽位被复用时代数递增，所以同一个标识在索引的生命周期内只对应一个桶。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl BucketId {
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// 竞技场下标
    pub const fn index(&self) -> usize {
        self.slot as usize
    }

    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.slot)
        } else {
            write!(f, "#{}.{}", self.slot, self.generation)
        }
    }
}

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 插入操作
    Insert,
    /// 删除操作
    Delete,
    /// 查询操作
    Lookup,
    /// 桶分裂
    Split,
    /// 目录倍增
    Grow,
    /// 重置
    Reset,
}

impl OperationType {
    pub const ALL: [OperationType; 6] = [
        OperationType::Insert,
        OperationType::Delete,
        OperationType::Lookup,
        OperationType::Split,
        OperationType::Grow,
        OperationType::Reset,
    ];

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        !matches!(self, OperationType::Lookup)
    }

    /// 是否为插入引起的结构调整
    pub fn is_structural(&self) -> bool {
        matches!(self, OperationType::Split | OperationType::Grow)
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Delete => "delete",
            OperationType::Lookup => "lookup",
            OperationType::Split => "split",
            OperationType::Grow => "grow",
            OperationType::Reset => "reset",
        }
    }
}

/// 解析用户输入
///
/// 边界层在调用 `insert`/`delete` 之前用它校验原始文本，失败时应提示用户而不是
/// 把错误传进索引。
pub fn parse_value(input: &str) -> Result<HashValue, HashError> {
    let trimmed = input.trim();
    let parsed: i128 = trimmed.parse().map_err(|_| HashError::InvalidInput {
        input: input.to_string(),
    })?;

    if parsed < 0 {
        return Err(HashError::NegativeValue {
            input: trimmed.to_string(),
        });
    }

    HashValue::try_from(parsed).map_err(|_| HashError::ValueOutOfRange {
        input: trimmed.to_string(),
        max: HashValue::MAX,
    })
}
