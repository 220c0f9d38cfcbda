// src/map/bucket.rs
//! 桶实现 - 固定容量、按插入顺序保存的不重复值集合

use crate::types::HashValue;
use std::fmt;

/// 桶
///
/// 本身不做容量检查，调用方必须先确认 `is_full()` 为假再插入。
#[derive(Clone, PartialEq, Eq)]
pub struct Bucket {
    local_depth: u8,
    values: Vec<HashValue>,
    capacity: usize,
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bucket(LD: {}, {:?})", self.local_depth, self.values)
    }
}

impl Bucket {
    pub fn new(local_depth: u8, capacity: usize) -> Self {
        Self {
            local_depth,
            values: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// 局部深度
    pub fn local_depth(&self) -> u8 {
        self.local_depth
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 返回桶中所有值（插入顺序）
    pub fn values(&self) -> &[HashValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    pub fn contains(&self, value: HashValue) -> bool {
        self.values.contains(&value)
    }

    /// 追加值，已存在时不做任何事
    ///
    /// 返回是否真正追加了新值
    pub fn insert(&mut self, value: HashValue) -> bool {
        if self.contains(value) {
            return false;
        }
        debug_assert!(!self.is_full(), "向已满的桶插入: {:?}", self);
        self.values.push(value);
        true
    }

    /// 删除值，不存在时不是错误
    ///
    /// 返回是否真正删除了值
    pub fn delete(&mut self, value: HashValue) -> bool {
        match self.values.iter().position(|&v| v == value) {
            Some(pos) => {
                self.values.remove(pos);
                true
            }
            None => false,
        }
    }

    /// 取走所有值，桶变为空
    pub(crate) fn take_values(&mut self) -> Vec<HashValue> {
        std::mem::take(&mut self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_full() {
        let mut bucket = Bucket::new(1, 3);
        assert!(bucket.is_empty());
        assert!(!bucket.is_full());

        assert!(bucket.insert(4));
        assert!(bucket.insert(0));
        assert!(!bucket.is_full());
        assert!(bucket.insert(8));
        assert!(bucket.is_full());

        // 插入顺序保留
        assert_eq!(bucket.values(), &[4, 0, 8]);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut bucket = Bucket::new(1, 3);
        assert!(bucket.insert(5));
        assert!(!bucket.insert(5));
        assert_eq!(bucket.values(), &[5]);

        // 已满时重复插入也不会越界
        bucket.insert(6);
        bucket.insert(7);
        assert!(!bucket.insert(6));
        assert_eq!(bucket.len(), 3);
    }

    #[test]
    fn test_delete() {
        let mut bucket = Bucket::new(2, 3);
        bucket.insert(1);
        bucket.insert(2);
        bucket.insert(3);

        assert!(bucket.delete(2));
        assert_eq!(bucket.values(), &[1, 3]);
        assert!(!bucket.is_full());

        // 不存在的值
        assert!(!bucket.delete(42));
        assert_eq!(bucket.values(), &[1, 3]);
    }

    #[test]
    fn test_take_values() {
        let mut bucket = Bucket::new(1, 3);
        bucket.insert(9);
        bucket.insert(1);
        assert_eq!(bucket.take_values(), vec![9, 1]);
        assert!(bucket.is_empty());
        assert_eq!(bucket.local_depth(), 1);
    }
}
