//! 文档映射约定
//!
//! 领域对象通过实现 `Document` 声明自己存放在哪个索引和类型下，
//! 并由 serde 负责与原始文档之间的转换

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::entity::Entity;

/// 默认文档类型
pub const DEFAULT_DOCUMENT_TYPE: &str = "_doc";

/// 可存储到搜索引擎的文档
pub trait Document: Entity<Id: Display> + Serialize + DeserializeOwned + Send + Sync {
    /// 索引名称（不含前缀）
    const INDEX: &'static str;

    /// 文档类型
    const TYPE: &'static str = DEFAULT_DOCUMENT_TYPE;

    /// 文档 ID
    fn document_id(&self) -> String {
        self.id().to_string()
    }
}

/// 拼接索引前缀
pub fn prefixed_index(prefix: Option<&str>, index: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}{}", prefix, index),
        _ => index.to_string(),
    }
}
