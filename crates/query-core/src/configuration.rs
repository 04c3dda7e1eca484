//! 查询配置
//!
//! `QueryConfiguration` 聚合一次搜索请求的全部非查询体参数。
//! 它只是一个值对象：除了拒绝缺失的分页以外，所有 setter 都接受任意值，
//! 字段之间的一致性由执行层校验。

use docsearch_common::{Pagination, Sort};
use docsearch_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::options::{IndexVisibilityOptions, SearchStrategy};
use crate::source_filter::SourceFilter;

/// 查询配置
///
/// 反序列化时分页携带的排序同样会并入 `sort`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawQueryConfiguration")]
pub struct QueryConfiguration {
    pagination: Pagination,
    sort: Option<Sort>,
    indices: Vec<String>,
    types: Vec<String>,
    fields: Vec<String>,
    source_filter: Option<SourceFilter>,
    min_score: f32,
    ids: Option<Vec<String>>,
    route: Option<String>,
    search_strategy: SearchStrategy,
    index_visibility: Option<IndexVisibilityOptions>,
    track_scores: bool,
    preference: Option<String>,
    result_limit: Option<u32>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawQueryConfiguration {
    pagination: Pagination,
    sort: Option<Sort>,
    indices: Vec<String>,
    types: Vec<String>,
    fields: Vec<String>,
    source_filter: Option<SourceFilter>,
    min_score: f32,
    ids: Option<Vec<String>>,
    route: Option<String>,
    search_strategy: SearchStrategy,
    index_visibility: Option<IndexVisibilityOptions>,
    track_scores: bool,
    preference: Option<String>,
    result_limit: Option<u32>,
}

impl From<RawQueryConfiguration> for QueryConfiguration {
    fn from(raw: RawQueryConfiguration) -> Self {
        let page_sort = raw.pagination.sort().clone();
        let mut config = Self {
            pagination: raw.pagination,
            sort: raw.sort,
            indices: raw.indices,
            types: raw.types,
            fields: raw.fields,
            source_filter: raw.source_filter,
            min_score: raw.min_score,
            ids: raw.ids,
            route: raw.route,
            search_strategy: raw.search_strategy,
            index_visibility: raw.index_visibility,
            track_scores: raw.track_scores,
            preference: raw.preference,
            result_limit: raw.result_limit,
        };

        // 序列化输出的 sort 已经以分页排序结尾，不再重复追加
        let folded = config
            .sort
            .as_ref()
            .is_some_and(|sort| sort.orders().ends_with(page_sort.orders()));
        if !folded {
            config.add_sort(page_sort);
        }
        config
    }
}

impl QueryConfiguration {
    /// 创建默认配置（第 0 页，每页 10 条，无排序）
    pub fn new() -> Self {
        Self::default()
    }

    // ---- 分页与排序 ----

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// 设置分页
    ///
    /// 分页缺失时返回 `InvalidArgument` 且不修改任何状态；
    /// 否则分页携带的排序会追加到当前排序之后
    pub fn set_pagination(&mut self, pagination: Option<Pagination>) -> AppResult<&mut Self> {
        let pagination = pagination
            .ok_or_else(|| AppError::invalid_argument("Pagination must not be absent"))?;
        Ok(self.apply_pagination(pagination))
    }

    /// 设置分页（已持有分页值时使用，不会失败）
    pub fn apply_pagination(&mut self, pagination: Pagination) -> &mut Self {
        let sort = pagination.sort().clone();
        self.pagination = pagination;
        self.add_sort(sort)
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// 追加排序
    ///
    /// 空排序不生效；已有排序时新条件排在已有条件之后，只用于打破平局
    pub fn add_sort(&mut self, sort: Sort) -> &mut Self {
        if sort.is_empty() {
            return self;
        }

        self.sort = Some(match self.sort.take() {
            Some(existing) => existing.and(sort),
            None => sort,
        });
        self
    }

    // ---- 目标与投影 ----

    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    /// 追加目标索引（保持顺序，允许重复）
    pub fn add_indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices.extend(indices.into_iter().map(Into::into));
        self
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// 追加目标类型（保持顺序，允许重复）
    pub fn add_types<I, S>(&mut self, types: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// 追加投影字段（保持顺序，允许重复）
    pub fn add_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn source_filter(&self) -> Option<&SourceFilter> {
        self.source_filter.as_ref()
    }

    pub fn set_source_filter(&mut self, source_filter: Option<SourceFilter>) -> &mut Self {
        self.source_filter = source_filter;
        self
    }

    // ---- 简单属性 ----

    pub fn min_score(&self) -> f32 {
        self.min_score
    }

    pub fn set_min_score(&mut self, min_score: f32) -> &mut Self {
        self.min_score = min_score;
        self
    }

    pub fn ids(&self) -> Option<&[String]> {
        self.ids.as_deref()
    }

    pub fn set_ids<I, S>(&mut self, ids: Option<I>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.map(|ids| ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn set_route(&mut self, route: Option<String>) -> &mut Self {
        self.route = route;
        self
    }

    pub fn search_strategy(&self) -> SearchStrategy {
        self.search_strategy
    }

    pub fn set_search_strategy(&mut self, search_strategy: SearchStrategy) -> &mut Self {
        self.search_strategy = search_strategy;
        self
    }

    pub fn index_visibility(&self) -> Option<&IndexVisibilityOptions> {
        self.index_visibility.as_ref()
    }

    pub fn set_index_visibility(
        &mut self,
        index_visibility: Option<IndexVisibilityOptions>,
    ) -> &mut Self {
        self.index_visibility = index_visibility;
        self
    }

    pub fn track_scores(&self) -> bool {
        self.track_scores
    }

    pub fn set_track_scores(&mut self, track_scores: bool) -> &mut Self {
        self.track_scores = track_scores;
        self
    }

    pub fn preference(&self) -> Option<&str> {
        self.preference.as_deref()
    }

    pub fn set_preference(&mut self, preference: Option<String>) -> &mut Self {
        self.preference = preference;
        self
    }

    // ---- 结果数量限制 ----

    pub fn result_limit(&self) -> Option<u32> {
        self.result_limit
    }

    /// 设置结果数量上限，与分页互相独立
    pub fn set_result_limit(&mut self, result_limit: Option<u32>) -> &mut Self {
        self.result_limit = result_limit;
        self
    }

    /// 是否设置了结果数量上限
    pub fn is_limiting(&self) -> bool {
        self.result_limit.is_some()
    }
}
