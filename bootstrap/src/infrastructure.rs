//! 搜索基础设施
//!
//! 由配置构建 Elasticsearch 模板，并按文档类型创建仓储

use std::sync::Arc;
use std::time::Duration;

use docsearch_adapter_elasticsearch::{
    ElasticsearchConfig, ElasticsearchRepository, ElasticsearchTemplate, RefreshPolicy,
    SearchTransport,
};
use docsearch_common::Pagination;
use docsearch_config::{AppConfig, ElasticsearchSettings, QuerySettings};
use docsearch_domain_core::Document;
use docsearch_errors::AppResult;
use docsearch_query_core::{SearchQuery, SearchStrategy};
use secrecy::ExposeSecret;
use tracing::info;

/// 搜索基础设施容器
pub struct SearchInfrastructure {
    config: AppConfig,
    template: Arc<ElasticsearchTemplate>,
    search_strategy: SearchStrategy,
    default_pagination: Pagination,
}

impl SearchInfrastructure {
    /// 从配置创建，传输层由调用方提供
    pub fn from_config(config: AppConfig, transport: Arc<dyn SearchTransport>) -> AppResult<Self> {
        let es_config = Self::build_elasticsearch_config(&config.elasticsearch, &config.query)?;
        let search_strategy: SearchStrategy = config.query.search_strategy.parse()?;
        let default_pagination = Pagination::new(0, config.query.default_page_size)?;

        info!(
            hosts = ?es_config.hosts,
            index_prefix = ?es_config.index_prefix,
            max_result_window = es_config.max_result_window,
            %search_strategy,
            "Elasticsearch template created"
        );

        Ok(Self {
            template: Arc::new(ElasticsearchTemplate::new(transport, es_config)),
            config,
            search_strategy,
            default_pagination,
        })
    }

    /// 构建 Elasticsearch 适配器配置
    fn build_elasticsearch_config(
        settings: &ElasticsearchSettings,
        query: &QuerySettings,
    ) -> AppResult<ElasticsearchConfig> {
        let refresh_policy: RefreshPolicy = settings.refresh_policy.parse()?;

        let mut config = ElasticsearchConfig::new(settings.hosts.iter().cloned())
            .with_request_timeout(Duration::from_secs(settings.request_timeout_secs))
            .with_max_result_window(query.max_result_window)
            .with_refresh_policy(refresh_policy)
            .with_retry(
                settings.retry.max_attempts,
                Duration::from_millis(settings.retry.initial_delay_ms),
                Duration::from_millis(settings.retry.max_delay_ms),
            );

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            config = config.with_auth(username, password.expose_secret());
        }

        if let Some(prefix) = &settings.index_prefix {
            config = config.with_index_prefix(prefix);
        }

        Ok(config)
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 Elasticsearch 模板
    pub fn template(&self) -> Arc<ElasticsearchTemplate> {
        self.template.clone()
    }

    /// 创建文档仓储
    pub fn repository<T: Document>(&self) -> ElasticsearchRepository<T> {
        ElasticsearchRepository::new(self.template.clone())
    }

    /// 默认分页
    pub fn default_pagination(&self) -> Pagination {
        self.default_pagination.clone()
    }

    /// 带默认搜索策略与分页的空查询
    pub fn new_query(&self) -> SearchQuery {
        SearchQuery::match_all()
            .with_search_strategy(self.search_strategy)
            .with_pagination(self.default_pagination())
    }
}
