//! 版本模块 - 索引修改计数

pub mod tracker;

pub use tracker::{VersionGuard, VersionTracker};
