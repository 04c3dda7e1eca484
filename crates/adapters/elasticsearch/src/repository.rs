//! Elasticsearch 仓储实现

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use docsearch_common::{PagedResult, Pagination, Sort};
use docsearch_domain_core::Document;
use docsearch_errors::AppResult;
use docsearch_ports::{PageableRepository, Repository, SearchHits, SearchRepository};
use docsearch_query_core::SearchQuery;
use tracing::info;

use crate::template::ElasticsearchTemplate;

/// 按文档类型的通用仓储
pub struct ElasticsearchRepository<T> {
    template: Arc<ElasticsearchTemplate>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ElasticsearchRepository<T> {
    fn clone(&self) -> Self {
        Self {
            template: Arc::clone(&self.template),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> ElasticsearchRepository<T> {
    pub fn new(template: Arc<ElasticsearchTemplate>) -> Self {
        Self {
            template,
            _marker: PhantomData,
        }
    }

    pub fn template(&self) -> &ElasticsearchTemplate {
        &self.template
    }

    /// 按条件查询并只返回文档内容
    pub async fn find_by_query(&self, query: &SearchQuery) -> AppResult<Vec<T>> {
        Ok(self.template.search::<T>(query).await?.into_contents())
    }

    /// 按条件分页查询
    pub async fn find_page(
        &self,
        query: SearchQuery,
        pagination: &Pagination,
    ) -> AppResult<PagedResult<T>> {
        let query = query.with_pagination(pagination.clone());
        Ok(self.template.search::<T>(&query).await?.into_page(pagination))
    }
}

#[async_trait]
impl<T> Repository<T, T::Id> for ElasticsearchRepository<T>
where
    T: Document,
    T::Id: Send + Sync,
{
    async fn find_by_id(&self, id: &T::Id) -> AppResult<Option<T>> {
        self.template.get::<T>(&id.to_string()).await
    }

    async fn save(&self, entity: &T) -> AppResult<()> {
        self.template.save(entity).await
    }

    async fn delete(&self, id: &T::Id) -> AppResult<()> {
        let id = id.to_string();
        if !self.template.delete::<T>(&id).await? {
            info!(index = T::INDEX, id = %id, "Document to delete was not found");
        }
        Ok(())
    }

    async fn exists(&self, id: &T::Id) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

#[async_trait]
impl<T> PageableRepository<T, T::Id> for ElasticsearchRepository<T>
where
    T: Document,
    T::Id: Send + Sync,
{
    async fn find_all(&self, pagination: &Pagination) -> AppResult<PagedResult<T>> {
        self.find_page(SearchQuery::match_all(), pagination).await
    }

    async fn find_all_sorted(&self, sort: &Sort) -> AppResult<Vec<T>> {
        let window = self.template.config().max_result_window;
        let limit = u32::try_from(window).unwrap_or(u32::MAX);
        let query = SearchQuery::match_all()
            .with_sort(sort.clone())
            .with_result_limit(limit);
        self.find_by_query(&query).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.template.count::<T>(&SearchQuery::match_all()).await
    }
}

#[async_trait]
impl<T> SearchRepository<T, T::Id> for ElasticsearchRepository<T>
where
    T: Document,
    T::Id: Send + Sync,
{
    async fn search(&self, query: &SearchQuery) -> AppResult<SearchHits<T>> {
        self.template.search::<T>(query).await
    }

    async fn find_all_by_id(&self, ids: &[T::Id]) -> AppResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let limit = u32::try_from(ids.len()).unwrap_or(u32::MAX);
        let query = SearchQuery::match_all()
            .with_ids(ids.iter().map(ToString::to_string))
            .with_result_limit(limit);
        self.find_by_query(&query).await
    }

    async fn save_all(&self, entities: &[T]) -> AppResult<u64> {
        self.template.save_all(entities).await
    }

    async fn count_matching(&self, query: &SearchQuery) -> AppResult<u64> {
        self.template.count::<T>(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ElasticsearchConfig;
    use crate::transport::MockSearchTransport;
    use docsearch_common::Order;
    use docsearch_domain_core::Entity;
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Article {
        id: u64,
        title: String,
    }

    impl Entity for Article {
        type Id = u64;

        fn id(&self) -> &u64 {
            &self.id
        }
    }

    impl Document for Article {
        const INDEX: &'static str = "articles";
    }

    fn repository(transport: MockSearchTransport, window: u64) -> ElasticsearchRepository<Article> {
        let config = ElasticsearchConfig::default().with_max_result_window(window);
        ElasticsearchRepository::new(Arc::new(ElasticsearchTemplate::new(
            Arc::new(transport),
            config,
        )))
    }

    fn hits(articles: &[(u64, &str)]) -> Value {
        let hits: Vec<Value> = articles
            .iter()
            .map(|(id, title)| {
                json!({
                    "_index": "articles",
                    "_id": id.to_string(),
                    "_score": null,
                    "_source": { "id": id, "title": title }
                })
            })
            .collect();
        json!({ "hits": { "total": 25, "hits": hits } })
    }

    #[tokio::test]
    async fn test_find_by_id_and_exists() {
        let mut transport = MockSearchTransport::new();
        transport
            .expect_get()
            .withf(|request| request.id == "7")
            .returning(|_| Ok(Some(json!({ "id": 7, "title": "Seven" }))));
        transport
            .expect_get()
            .withf(|request| request.id == "8")
            .returning(|_| Ok(None));

        let repo = repository(transport, 10_000);
        assert_eq!(repo.find_by_id(&7).await.unwrap().unwrap().title, "Seven");
        assert!(repo.exists(&7).await.unwrap());
        assert!(!repo.exists(&8).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_pages() {
        let mut transport = MockSearchTransport::new();
        transport
            .expect_search()
            .withf(|request| request.body["from"] == 10 && request.body["size"] == 10)
            .returning(|_| Ok(hits(&[(11, "a"), (12, "b")])));

        let repo = repository(transport, 10_000);
        let page = repo
            .find_all(&Pagination::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_find_all_sorted_uses_result_window() {
        let mut transport = MockSearchTransport::new();
        transport
            .expect_search()
            .withf(|request| {
                request.body["size"] == 500
                    && request.body["sort"] == json!([{ "title": { "order": "desc" } }])
            })
            .returning(|_| Ok(hits(&[(1, "b"), (2, "a")])));

        let repo = repository(transport, 500);
        let articles = repo
            .find_all_sorted(&Sort::from(Order::desc("title")))
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_by_id() {
        let mut transport = MockSearchTransport::new();
        transport
            .expect_search()
            .withf(|request| {
                request.body["query"]["bool"]["filter"][0]["ids"]["values"] == json!(["1", "2"])
                    && request.body["size"] == 2
            })
            .times(1)
            .returning(|_| Ok(hits(&[(2, "b"), (1, "a")])));

        let repo = repository(transport, 10_000);
        let articles = repo.find_all_by_id(&[1, 2]).await.unwrap();
        assert_eq!(articles.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_find_all_by_empty_ids_skips_transport() {
        let mut transport = MockSearchTransport::new();
        transport.expect_search().times(0);

        let repo = repository(transport, 10_000);
        assert!(repo.find_all_by_id(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_and_delete_missing() {
        let mut transport = MockSearchTransport::new();
        transport
            .expect_count()
            .returning(|_| Ok(json!({ "count": 25 })));
        transport.expect_delete().returning(|_| Ok(false));

        let repo = repository(transport, 10_000);
        assert_eq!(PageableRepository::count(&repo).await.unwrap(), 25);
        assert!(Repository::delete(&repo, &99).await.is_ok());
    }
}
