//! 内存管理模块 - 桶的存储与复用

pub mod arena;

pub use arena::{ArenaStats, BucketArena};
