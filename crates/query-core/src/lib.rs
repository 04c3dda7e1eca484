//! query-core - 搜索查询模型
//!
//! 描述一次搜索请求需要的全部配置：目标索引、分页、排序、字段投影、
//! 源过滤、评分阈值、ID 过滤、路由以及搜索策略。
//! 查询模型只在内存中聚合参数，翻译成线上请求由适配器负责。

mod configuration;
mod criteria;
mod options;
mod query;
mod source_filter;

pub use configuration::*;
pub use criteria::*;
pub use options::*;
pub use query::*;
pub use source_filter::*;

pub use docsearch_common::{Direction, NullHandling, Order, Pagination, Sort};
