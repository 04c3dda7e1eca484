//! Repository trait 定义

use async_trait::async_trait;
use docsearch_common::{PagedResult, Pagination, Sort};
use docsearch_errors::AppResult;
use docsearch_query_core::SearchQuery;

use crate::hits::SearchHits;

/// 基础 Repository trait
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// 根据 ID 查找
    async fn find_by_id(&self, id: &ID) -> AppResult<Option<T>>;

    /// 保存实体（存在则覆盖）
    async fn save(&self, entity: &T) -> AppResult<()>;

    /// 删除实体
    async fn delete(&self, id: &ID) -> AppResult<()>;

    /// 检查是否存在
    async fn exists(&self, id: &ID) -> AppResult<bool>;
}

/// 支持分页与排序的 Repository
#[async_trait]
pub trait PageableRepository<T, ID>: Repository<T, ID> {
    /// 分页查询所有
    async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<T>>;

    /// 按排序查询所有（受结果窗口限制）
    async fn find_all_sorted(&self, sort: &Sort) -> AppResult<Vec<T>>;

    /// 统计总数
    async fn count(&self) -> AppResult<u64>;
}

/// 支持任意搜索查询的 Repository
#[async_trait]
pub trait SearchRepository<T, ID>: PageableRepository<T, ID> {
    /// 执行搜索
    async fn search(&self, query: &SearchQuery) -> AppResult<SearchHits<T>>;

    /// 按 ID 批量查找，结果顺序与搜索引擎返回一致
    async fn find_all_by_id(&self, ids: &[ID]) -> AppResult<Vec<T>>;

    /// 批量保存
    async fn save_all(&self, entities: &[T]) -> AppResult<u64>;

    /// 统计匹配查询的文档数
    async fn count_matching(&self, query: &SearchQuery) -> AppResult<u64>;
}
