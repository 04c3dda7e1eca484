//! domain-core - 领域文档核心类型
//!
//! 定义实体与搜索引擎文档之间的映射约定

mod document;
mod entity;

pub use document::*;
pub use entity::*;
