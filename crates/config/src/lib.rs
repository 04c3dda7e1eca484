//! docsearch-config - 配置加载库
//!
//! 加载顺序：`.env` -> `default.toml` -> `{APP_ENV}.toml` -> `DOCSEARCH_` 前缀的环境变量，
//! 后加载的覆盖先加载的。嵌套字段在环境变量中用 `__` 分隔，
//! 例如 `DOCSEARCH_ELASTICSEARCH__INDEX_PREFIX`。

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "DOCSEARCH_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 重试配置
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    100
}

fn default_max_delay_ms() -> u64 {
    5000
}

/// Elasticsearch 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchSettings {
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    /// 索引名前缀，用于按环境隔离
    pub index_prefix: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// 写入刷新策略：none / immediate / wait_for
    #[serde(default = "default_refresh_policy")]
    pub refresh_policy: String,
    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_hosts() -> Vec<String> {
    vec!["http://localhost:9200".to_string()]
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_refresh_policy() -> String {
    "none".to_string()
}

/// 查询配置
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    /// 未指定分页时的分页大小
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// from + size 的上限
    #[serde(default = "default_max_result_window")]
    pub max_result_window: u64,
    /// 搜索策略：query_then_fetch / dfs_query_then_fetch
    #[serde(default = "default_search_strategy")]
    pub search_strategy: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_result_window: default_max_result_window(),
            search_strategy: default_search_strategy(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_result_window() -> u64 {
    10_000
}

fn default_search_strategy() -> String {
    "dfs_query_then_fetch".to_string()
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 输出 JSON 格式日志
    #[serde(default)]
    pub json: bool,
    /// Prometheus 指标监听地址，为空时不启动导出器
    pub metrics_addr: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            metrics_addr: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub elasticsearch: ElasticsearchSettings,
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        // .env 文件不存在时忽略
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());
        Self::from_figment(Self::figment(config_dir, &env))
    }

    /// 配置来源
    pub fn figment(config_dir: &str, env: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
