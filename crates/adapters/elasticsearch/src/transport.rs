//! 传输层抽象
//!
//! 请求已经翻译成路径无关的结构，具体的 HTTP 客户端由调用方提供

use async_trait::async_trait;
use docsearch_errors::AppResult;
use serde_json::Value;

use crate::request::{DeleteRequest, GetRequest, IndexRequest, SearchRequest};

/// 搜索引擎传输层
///
/// 实现方负责发送请求并把非 2xx 响应转换为 `AppError::ExternalService`，
/// 错误信息需保留搜索引擎返回的错误类型，以便判断是否可重试
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// 执行 `_search`，返回原始响应
    async fn search(&self, request: &SearchRequest) -> AppResult<Value>;

    /// 执行 `_count`，返回原始响应
    async fn count(&self, request: &SearchRequest) -> AppResult<Value>;

    /// 按 ID 获取文档，文档不存在时返回 `None`
    async fn get(&self, request: &GetRequest) -> AppResult<Option<Value>>;

    /// 写入文档，返回原始响应
    async fn index(&self, request: &IndexRequest) -> AppResult<Value>;

    /// 删除文档，返回文档是否存在
    async fn delete(&self, request: &DeleteRequest) -> AppResult<bool>;
}
