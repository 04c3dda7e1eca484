//! 响应映射
//!
//! 把原始 JSON 响应映射为类型化的命中结果

use docsearch_errors::{AppError, AppResult};
use docsearch_ports::{SearchHit, SearchHits, TotalRelation};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

// ==================== 原始响应结构 ====================

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    hits: RawHits,
}

#[derive(Debug, Deserialize)]
struct RawHits {
    #[serde(default)]
    total: Option<RawTotal>,
    #[serde(default)]
    max_score: Option<f32>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// 旧版本返回数字，新版本返回 `{ value, relation }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Count(u64),
    Object { value: u64, relation: String },
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_index")]
    index: String,
    #[serde(rename = "_score", default)]
    score: Option<f32>,
    #[serde(rename = "_routing", default)]
    routing: Option<String>,
    #[serde(rename = "_source", default)]
    source: Option<Value>,
    #[serde(default)]
    sort: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCount {
    count: u64,
}

// ==================== 映射器 ====================

/// 结果映射器
pub struct ResultMapper;

impl ResultMapper {
    /// 映射 `_search` 响应
    pub fn map_search_hits<T: DeserializeOwned>(response: Value) -> AppResult<SearchHits<T>> {
        let raw: RawSearchResponse = serde_json::from_value(response)
            .map_err(|e| AppError::mapping(format!("Malformed search response: {}", e)))?;

        let (total, total_relation) = match raw.hits.total {
            Some(RawTotal::Count(value)) => (value, TotalRelation::Equal),
            Some(RawTotal::Object { value, relation }) => {
                let relation = if relation == "gte" {
                    TotalRelation::GreaterThanOrEqual
                } else {
                    TotalRelation::Equal
                };
                (value, relation)
            }
            None => (raw.hits.hits.len() as u64, TotalRelation::Equal),
        };

        let hits = raw
            .hits
            .hits
            .into_iter()
            .map(Self::map_hit)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(SearchHits {
            total,
            total_relation,
            max_score: raw.hits.max_score,
            hits,
        })
    }

    /// 映射 `_count` 响应
    pub fn map_count(response: Value) -> AppResult<u64> {
        let raw: RawCount = serde_json::from_value(response)
            .map_err(|e| AppError::mapping(format!("Malformed count response: {}", e)))?;
        Ok(raw.count)
    }

    /// 映射单个文档源
    pub fn map_document<T: DeserializeOwned>(source: Value) -> AppResult<T> {
        serde_json::from_value(source)
            .map_err(|e| AppError::mapping(format!("Failed to map document: {}", e)))
    }

    fn map_hit<T: DeserializeOwned>(raw: RawHit) -> AppResult<SearchHit<T>> {
        let source = raw.source.ok_or_else(|| {
            AppError::mapping(format!("Hit {} in {} has no _source", raw.id, raw.index))
        })?;

        Ok(SearchHit {
            content: Self::map_document(source)?,
            id: raw.id,
            index: raw.index,
            score: raw.score,
            sort_values: raw.sort,
            routing: raw.routing,
        })
    }
}
