//! Elasticsearch 模板
//!
//! 组合请求构建、传输、重试、映射与指标，提供按文档类型的操作

use std::sync::Arc;

use docsearch_domain_core::Document;
use docsearch_errors::AppResult;
use docsearch_ports::SearchHits;
use docsearch_query_core::SearchQuery;
use tracing::debug;

use crate::config::ElasticsearchConfig;
use crate::mapper::ResultMapper;
use crate::request::RequestBuilder;
use crate::retry::{RetryConfig, with_retry};
use crate::search_metrics::RequestTimer;
use crate::transport::SearchTransport;

/// Elasticsearch 模板
pub struct ElasticsearchTemplate {
    transport: Arc<dyn SearchTransport>,
    config: ElasticsearchConfig,
    requests: RequestBuilder,
    retry: RetryConfig,
}

impl ElasticsearchTemplate {
    pub fn new(transport: Arc<dyn SearchTransport>, config: ElasticsearchConfig) -> Self {
        Self {
            requests: RequestBuilder::new(&config),
            retry: RetryConfig::from_elasticsearch_config(&config),
            transport,
            config,
        }
    }

    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }

    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    /// 文档类型所在的实际索引名
    pub fn index_name<T: Document>(&self) -> String {
        self.requests.index_name(T::INDEX)
    }

    /// 执行搜索
    pub async fn search<T: Document>(&self, query: &SearchQuery) -> AppResult<SearchHits<T>> {
        let request = self.requests.search_request(query, T::INDEX)?;
        debug!(path = %request.path("_search"), body = %request.body, "Executing search");

        let transport = &self.transport;
        let request = &request;
        let timer = RequestTimer::new(T::INDEX, "search");
        let result = with_retry(&self.retry, "search", move || transport.search(request)).await;
        timer.observe(&result);

        let hits: SearchHits<T> = ResultMapper::map_search_hits(result?)?;
        debug!(total = hits.total, returned = hits.len(), "Search completed");
        Ok(hits)
    }

    /// 统计匹配文档数
    pub async fn count<T: Document>(&self, query: &SearchQuery) -> AppResult<u64> {
        let request = self.requests.count_request(query, T::INDEX)?;
        debug!(path = %request.path("_count"), "Executing count");

        let transport = &self.transport;
        let request = &request;
        let timer = RequestTimer::new(T::INDEX, "count");
        let result = with_retry(&self.retry, "count", move || transport.count(request)).await;
        timer.observe(&result);

        ResultMapper::map_count(result?)
    }

    /// 按 ID 获取文档
    pub async fn get<T: Document>(&self, id: &str) -> AppResult<Option<T>> {
        self.get_with_routing(id, None).await
    }

    /// 按 ID 和路由获取文档，写入时指定过路由的文档需要用同一路由读取
    pub async fn get_with_routing<T: Document>(
        &self,
        id: &str,
        routing: Option<&str>,
    ) -> AppResult<Option<T>> {
        let request = self.requests.get_request(T::INDEX, T::TYPE, id, routing);

        let transport = &self.transport;
        let request = &request;
        let timer = RequestTimer::new(T::INDEX, "get");
        let result = with_retry(&self.retry, "get", move || transport.get(request)).await;
        timer.observe(&result);

        result?.map(ResultMapper::map_document).transpose()
    }

    /// 写入文档（存在则覆盖）
    pub async fn save<T: Document>(&self, document: &T) -> AppResult<()> {
        let id = document.document_id();
        let source = serde_json::to_value(document)?;
        let request = self.requests.index_request(T::INDEX, T::TYPE, &id, source);

        let transport = &self.transport;
        let request = &request;
        let timer = RequestTimer::new(T::INDEX, "index");
        let result = with_retry(&self.retry, "index", move || transport.index(request)).await;
        timer.observe(&result);

        result?;
        debug!(id = %id, "Document saved");
        Ok(())
    }

    /// 依次写入多个文档，返回写入数量
    ///
    /// 遇到第一个错误即返回，之前写入的文档不会回滚
    pub async fn save_all<T: Document>(&self, documents: &[T]) -> AppResult<u64> {
        let mut saved = 0;
        for document in documents {
            self.save(document).await?;
            saved += 1;
        }
        Ok(saved)
    }

    /// 删除文档，返回文档是否存在
    pub async fn delete<T: Document>(&self, id: &str) -> AppResult<bool> {
        let request = self.requests.delete_request(T::INDEX, T::TYPE, id);

        let transport = &self.transport;
        let request = &request;
        let timer = RequestTimer::new(T::INDEX, "delete");
        let result = with_retry(&self.retry, "delete", move || transport.delete(request)).await;
        timer.observe(&result);

        let found = result?;
        debug!(id = %id, found, "Document deleted");
        Ok(found)
    }
}
