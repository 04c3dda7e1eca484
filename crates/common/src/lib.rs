//! common - 通用类型库
//!
//! 排序与分页值对象，被查询模型、端口与适配器共享

pub mod pagination;
pub mod sort;

pub use pagination::*;
pub use sort::*;
