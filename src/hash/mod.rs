//! 哈希模块 - 值到目录键的映射
//!
//! 使用取模而不是混淆哈希：`value mod 2^global_depth`。数值上同余的值会落到同一个目录键，
//! 这是索引的既定行为。

use crate::types::{DirectoryKey, HashValue};

/// 计算值对应的目录键
///
/// 对 2 的幂取模等价于截取低 `global_depth` 位
#[inline]
pub fn directory_key(value: HashValue, global_depth: u8) -> DirectoryKey {
    DirectoryKey::new(value, global_depth)
}

/// 给定全局深度下的目录大小
#[inline]
pub fn directory_size(global_depth: u8) -> usize {
    1usize << global_depth
}

/// 值的完整二进制表示（不补零）
pub fn binary_repr(value: HashValue) -> String {
    format!("{:b}", value)
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_key_is_modulo() {
        assert_eq!(directory_key(13, 2).to_string(), "01");
        assert_eq!(directory_key(13, 3).to_string(), "101");
        assert_eq!(directory_key(4, 2).to_string(), "00");
        for value in [0u32, 1, 7, 100, 12345] {
            assert_eq!(directory_key(value, 3).bits(), value % 8);
        }
    }

    #[test]
    fn test_congruent_values_collide() {
        for depth in 1..=6u8 {
            let modulus = 1u32 << depth;
            for value in [0u32, 3, 17, 1000] {
                for k in 0..5u32 {
                    assert_eq!(
                        directory_key(value, depth),
                        directory_key(value + k * modulus, depth),
                        "同余的值应落到同一个目录键"
                    );
                }
            }
        }
    }

    #[test]
    fn test_full_width_key() {
        let key = directory_key(u32::MAX, 32);
        assert_eq!(key.to_string().len(), 32);
        assert_eq!(key.bits(), u32::MAX);
    }

    #[test]
    fn test_directory_size() {
        assert_eq!(directory_size(0), 1);
        assert_eq!(directory_size(2), 4);
        assert_eq!(directory_size(10), 1024);
    }

    #[test]
    fn test_binary_repr() {
        assert_eq!(binary_repr(0), "0");
        assert_eq!(binary_repr(12), "1100");
        assert_eq!(binary_repr(5), "101");
    }
}
