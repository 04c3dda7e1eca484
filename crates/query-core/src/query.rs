//! 搜索查询
//!
//! 查询体与查询配置组合成一次完整的搜索查询

use docsearch_common::{Pagination, Sort};
use serde::{Deserialize, Serialize};

use crate::configuration::QueryConfiguration;
use crate::criteria::Criteria;
use crate::options::{IndexVisibilityOptions, SearchStrategy};
use crate::source_filter::SourceFilter;

/// 查询体
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "body")]
pub enum QueryBody {
    /// 匹配全部文档
    #[default]
    MatchAll,
    /// 条件查询
    Criteria(Criteria),
    /// 原始查询 JSON
    Raw(String),
}

/// 搜索查询
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    body: QueryBody,
    configuration: QueryConfiguration,
}

impl SearchQuery {
    pub fn new(body: QueryBody) -> Self {
        Self {
            body,
            configuration: QueryConfiguration::new(),
        }
    }

    pub fn match_all() -> Self {
        Self::new(QueryBody::MatchAll)
    }

    pub fn criteria(criteria: Criteria) -> Self {
        Self::new(QueryBody::Criteria(criteria))
    }

    pub fn raw(source: impl Into<String>) -> Self {
        Self::new(QueryBody::Raw(source.into()))
    }

    pub fn body(&self) -> &QueryBody {
        &self.body
    }

    pub fn configuration(&self) -> &QueryConfiguration {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut QueryConfiguration {
        &mut self.configuration
    }

    pub fn into_parts(self) -> (QueryBody, QueryConfiguration) {
        (self.body, self.configuration)
    }

    // ---- 构建器 ----

    /// 设置分页（分页的排序追加到已有排序之后）
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.configuration.apply_pagination(pagination);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.configuration.add_sort(sort);
        self
    }

    pub fn with_indices<I, S>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration.add_indices(indices);
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration.add_types(types);
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration.add_fields(fields);
        self
    }

    pub fn with_source_filter(mut self, source_filter: SourceFilter) -> Self {
        self.configuration.set_source_filter(Some(source_filter));
        self
    }

    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.configuration.set_min_score(min_score);
        self
    }

    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration.set_ids(Some(ids));
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.configuration.set_route(Some(route.into()));
        self
    }

    pub fn with_search_strategy(mut self, search_strategy: SearchStrategy) -> Self {
        self.configuration.set_search_strategy(search_strategy);
        self
    }

    pub fn with_index_visibility(mut self, options: IndexVisibilityOptions) -> Self {
        self.configuration.set_index_visibility(Some(options));
        self
    }

    pub fn with_track_scores(mut self, track_scores: bool) -> Self {
        self.configuration.set_track_scores(track_scores);
        self
    }

    pub fn with_preference(mut self, preference: impl Into<String>) -> Self {
        self.configuration.set_preference(Some(preference.into()));
        self
    }

    pub fn with_result_limit(mut self, limit: u32) -> Self {
        self.configuration.set_result_limit(Some(limit));
        self
    }
}
