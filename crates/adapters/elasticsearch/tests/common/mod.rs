//! 集成测试公共设施

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use docsearch_adapter_elasticsearch::{
    DeleteRequest, ElasticsearchConfig, ElasticsearchTemplate, GetRequest, IndexRequest,
    SearchRequest, SearchTransport,
};
use docsearch_errors::AppResult;
use parking_lot::Mutex;
use serde_json::{Value, json};

/// 记录请求的内存传输层
///
/// 文档按 `索引 -> ID` 存放；搜索只识别 ID 过滤，其余查询视为匹配全部
#[derive(Default)]
pub struct RecordingTransport {
    documents: Mutex<BTreeMap<String, BTreeMap<String, Value>>>,
    searches: Mutex<Vec<SearchRequest>>,
    writes: Mutex<Vec<IndexRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn searches(&self) -> Vec<SearchRequest> {
        self.searches.lock().clone()
    }

    pub fn writes(&self) -> Vec<IndexRequest> {
        self.writes.lock().clone()
    }

    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.documents
            .lock()
            .get(index)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    fn matching(&self, request: &SearchRequest) -> Vec<(String, String, Value)> {
        let ids: Option<Vec<String>> = request.body["query"]["bool"]["filter"][0]["ids"]["values"]
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            });

        let documents = self.documents.lock();
        request
            .indices
            .iter()
            .filter_map(|index| documents.get(index).map(|docs| (index, docs)))
            .flat_map(|(index, docs)| {
                docs.iter()
                    .map(move |(id, source)| (index.clone(), id.clone(), source.clone()))
            })
            .filter(|(_, id, _)| ids.as_ref().is_none_or(|ids| ids.contains(id)))
            .collect()
    }
}

#[async_trait]
impl SearchTransport for RecordingTransport {
    async fn search(&self, request: &SearchRequest) -> AppResult<Value> {
        self.searches.lock().push(request.clone());

        let matching = self.matching(request);
        let from = request.body["from"].as_u64().unwrap_or(0) as usize;
        let size = request.body["size"].as_u64().unwrap_or(10) as usize;
        let hits: Vec<Value> = matching
            .iter()
            .skip(from)
            .take(size)
            .map(|(index, id, source)| {
                json!({ "_index": index, "_id": id, "_score": 1.0, "_source": source })
            })
            .collect();

        Ok(json!({
            "hits": {
                "total": { "value": matching.len(), "relation": "eq" },
                "max_score": 1.0,
                "hits": hits
            }
        }))
    }

    async fn count(&self, request: &SearchRequest) -> AppResult<Value> {
        Ok(json!({ "count": self.matching(request).len() }))
    }

    async fn get(&self, request: &GetRequest) -> AppResult<Option<Value>> {
        Ok(self.document(&request.index, &request.id))
    }

    async fn index(&self, request: &IndexRequest) -> AppResult<Value> {
        self.writes.lock().push(request.clone());
        self.documents
            .lock()
            .entry(request.index.clone())
            .or_default()
            .insert(request.id.clone(), request.source.clone());
        Ok(json!({ "_id": request.id, "result": "created" }))
    }

    async fn delete(&self, request: &DeleteRequest) -> AppResult<bool> {
        Ok(self
            .documents
            .lock()
            .get_mut(&request.index)
            .and_then(|docs| docs.remove(&request.id))
            .is_some())
    }
}

/// 基于内存传输层的模板
pub fn template(transport: Arc<RecordingTransport>) -> Arc<ElasticsearchTemplate> {
    let config = ElasticsearchConfig::default().with_index_prefix("test-");
    Arc::new(ElasticsearchTemplate::new(transport, config))
}
