//! adapter-elasticsearch - Elasticsearch 适配器
//!
//! 查询的执行层，包括：
//! - 把 `SearchQuery` 翻译为搜索请求（请求体 + 查询参数）
//! - 条件查询到查询 DSL 的转换
//! - 原始响应到类型化命中结果的映射
//! - 带重试与指标的模板操作
//! - 仓储 trait 的实现
//!
//! 传输层通过 `SearchTransport` 注入，本 crate 不包含 HTTP 客户端

mod config;
mod dsl;
mod mapper;
mod search_metrics;
mod repository;
mod request;
mod retry;
mod template;
mod transport;

pub use config::*;
pub use dsl::*;
pub use mapper::*;
pub use search_metrics::*;
pub use repository::*;
pub use request::*;
pub use retry::*;
pub use template::*;
pub use transport::*;
