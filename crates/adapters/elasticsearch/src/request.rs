//! 请求翻译
//!
//! 把 `SearchQuery` 翻译成请求体与查询参数。
//!
//! 结果上限与分页同时存在时：`from` 取分页偏移，`size` 取结果上限。
//! `from + size` 超过最大结果窗口时直接拒绝，不发送请求。

use std::collections::BTreeMap;

use docsearch_common::{Direction, NullHandling, Sort};
use docsearch_domain_core::prefixed_index;
use docsearch_errors::{AppError, AppResult};
use docsearch_query_core::{QueryBody, QueryConfiguration, SearchQuery};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::config::{ElasticsearchConfig, RefreshPolicy};
use crate::dsl::criteria_to_dsl;

/// 按相关性评分排序的伪字段
pub const SCORE_FIELD: &str = "_score";

/// 搜索请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub indices: Vec<String>,
    pub types: Vec<String>,
    pub body: Value,
    pub params: BTreeMap<String, String>,
}

impl SearchRequest {
    /// 请求路径，例如 `/books,magazines/_search`
    pub fn path(&self, endpoint: &str) -> String {
        let mut path = format!("/{}", self.indices.join(","));
        if !self.types.is_empty() {
            path.push('/');
            path.push_str(&self.types.join(","));
        }
        path.push('/');
        path.push_str(endpoint);
        path
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// 按 ID 获取文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    pub index: String,
    pub doc_type: String,
    pub id: String,
    pub routing: Option<String>,
}

/// 写入文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRequest {
    pub index: String,
    pub doc_type: String,
    pub id: String,
    pub source: Value,
    pub refresh: Option<String>,
}

/// 删除文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub index: String,
    pub doc_type: String,
    pub id: String,
    pub refresh: Option<String>,
}

/// 请求构建器
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    index_prefix: Option<String>,
    max_result_window: u64,
    refresh_policy: RefreshPolicy,
}

impl RequestBuilder {
    pub fn new(config: &ElasticsearchConfig) -> Self {
        Self {
            index_prefix: config.index_prefix.clone(),
            max_result_window: config.max_result_window,
            refresh_policy: config.refresh_policy,
        }
    }

    pub fn max_result_window(&self) -> u64 {
        self.max_result_window
    }

    /// 文档所在的实际索引名
    pub fn index_name(&self, index: &str) -> String {
        prefixed_index(self.index_prefix.as_deref(), index)
    }

    /// 构建 `_search` 请求
    ///
    /// 查询未指定目标索引时使用 `default_index`，所有索引名都会加上前缀
    pub fn search_request(
        &self,
        query: &SearchQuery,
        default_index: &str,
    ) -> AppResult<SearchRequest> {
        let config = query.configuration();
        let pagination = config.pagination();

        let from = pagination.offset();
        let size = config.result_limit().unwrap_or(pagination.size()) as u64;
        if from + size > self.max_result_window {
            return Err(AppError::invalid_argument(format!(
                "Result window is too large, from + size must be less than or equal to {} but was {}",
                self.max_result_window,
                from + size
            )));
        }

        let mut body = Map::new();
        body.insert("query".to_string(), query_dsl(query)?);
        body.insert("from".to_string(), json!(from));
        body.insert("size".to_string(), json!(size));

        if let Some(sort) = config.sort() {
            body.insert("sort".to_string(), sort_dsl(sort));
        }

        // 源过滤优先于字段投影
        if let Some(filter) = config.source_filter() {
            body.insert("_source".to_string(), serde_json::to_value(filter)?);
        } else if !config.fields().is_empty() {
            body.insert("_source".to_string(), json!({ "includes": config.fields() }));
        }

        if config.min_score() > 0.0 {
            body.insert("min_score".to_string(), json!(config.min_score()));
        }

        if config.track_scores() {
            body.insert("track_scores".to_string(), Value::Bool(true));
        }

        let mut params = common_params(config);
        params.insert(
            "search_type".to_string(),
            config.search_strategy().as_str().to_string(),
        );

        Ok(SearchRequest {
            indices: self.target_indices(config, default_index),
            types: config.types().to_vec(),
            body: Value::Object(body),
            params,
        })
    }

    /// 构建 `_count` 请求（忽略分页、排序与投影）
    pub fn count_request(
        &self,
        query: &SearchQuery,
        default_index: &str,
    ) -> AppResult<SearchRequest> {
        let config = query.configuration();

        let mut body = Map::new();
        body.insert("query".to_string(), query_dsl(query)?);
        if config.min_score() > 0.0 {
            body.insert("min_score".to_string(), json!(config.min_score()));
        }

        Ok(SearchRequest {
            indices: self.target_indices(config, default_index),
            types: config.types().to_vec(),
            body: Value::Object(body),
            params: common_params(config),
        })
    }

    pub fn get_request(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        routing: Option<&str>,
    ) -> GetRequest {
        GetRequest {
            index: self.index_name(index),
            doc_type: doc_type.to_string(),
            id: id.to_string(),
            routing: routing.map(str::to_string),
        }
    }

    pub fn index_request(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        source: Value,
    ) -> IndexRequest {
        IndexRequest {
            index: self.index_name(index),
            doc_type: doc_type.to_string(),
            id: id.to_string(),
            source,
            refresh: self.refresh_policy.as_param().map(str::to_string),
        }
    }

    pub fn delete_request(&self, index: &str, doc_type: &str, id: &str) -> DeleteRequest {
        DeleteRequest {
            index: self.index_name(index),
            doc_type: doc_type.to_string(),
            id: id.to_string(),
            refresh: self.refresh_policy.as_param().map(str::to_string),
        }
    }

    /// 目标索引，显式指定的索引同样加上前缀
    fn target_indices(&self, config: &QueryConfiguration, default_index: &str) -> Vec<String> {
        if config.indices().is_empty() {
            vec![self.index_name(default_index)]
        } else {
            config
                .indices()
                .iter()
                .map(|index| self.index_name(index))
                .collect()
        }
    }
}

/// 查询体 DSL（含 ID 过滤）
fn query_dsl(query: &SearchQuery) -> AppResult<Value> {
    let base = match query.body() {
        QueryBody::MatchAll => json!({ "match_all": {} }),
        QueryBody::Criteria(criteria) => criteria_to_dsl(criteria),
        QueryBody::Raw(source) => serde_json::from_str(source).map_err(|e| {
            AppError::invalid_argument(format!("Raw query is not valid JSON: {}", e))
        })?,
    };

    Ok(match query.configuration().ids() {
        Some(ids) => json!({
            "bool": {
                "must": [base],
                "filter": [{ "ids": { "values": ids } }]
            }
        }),
        None => base,
    })
}

fn sort_dsl(sort: &Sort) -> Value {
    let orders = sort
        .iter()
        .map(|order| {
            let mut spec = Map::new();
            let direction = match order.direction() {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            spec.insert("order".to_string(), json!(direction));

            if order.property() != SCORE_FIELD {
                match order.null_handling() {
                    NullHandling::Native => {}
                    NullHandling::NullsFirst => {
                        spec.insert("missing".to_string(), json!("_first"));
                    }
                    NullHandling::NullsLast => {
                        spec.insert("missing".to_string(), json!("_last"));
                    }
                }
            }

            let mut entry = Map::new();
            entry.insert(order.property().to_string(), Value::Object(spec));
            Value::Object(entry)
        })
        .collect();

    Value::Array(orders)
}

/// 路由、偏好与索引可见性参数
fn common_params(config: &QueryConfiguration) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    if let Some(route) = config.route() {
        params.insert("routing".to_string(), route.to_string());
    }

    if let Some(preference) = config.preference() {
        params.insert("preference".to_string(), preference.to_string());
    }

    if let Some(options) = config.index_visibility() {
        params.insert(
            "ignore_unavailable".to_string(),
            options.ignore_unavailable.to_string(),
        );
        params.insert(
            "allow_no_indices".to_string(),
            options.allow_no_indices.to_string(),
        );
        params.insert(
            "expand_wildcards".to_string(),
            options.expand_wildcards.as_str().to_string(),
        );
    }

    params
}
