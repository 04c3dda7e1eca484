//! ports - 抽象 trait 层
//!
//! 定义文档仓储的抽象接口与搜索结果类型

mod hits;
mod repository;

pub use hits::*;
pub use repository::*;
