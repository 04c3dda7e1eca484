//! Elasticsearch 配置模块
//!
//! 提供连接、索引前缀、结果窗口、写入刷新与重试等设置

use std::str::FromStr;
use std::time::Duration;

use docsearch_errors::AppError;
use serde::{Deserialize, Serialize};

/// 写入后的刷新策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// 不主动刷新（默认）
    #[default]
    None,
    /// 立即刷新
    Immediate,
    /// 等待下一次刷新后返回
    WaitFor,
}

impl RefreshPolicy {
    /// 线上参数值，`None` 时不发送参数
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Immediate => Some("true"),
            Self::WaitFor => Some("wait_for"),
        }
    }
}

impl FromStr for RefreshPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "false" => Ok(Self::None),
            "immediate" | "true" => Ok(Self::Immediate),
            "wait_for" => Ok(Self::WaitFor),
            other => Err(AppError::invalid_argument(format!(
                "Unknown refresh policy: {}",
                other
            ))),
        }
    }
}

/// Elasticsearch 配置
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    // 连接配置
    /// 节点地址
    pub hosts: Vec<String>,
    /// 用户名
    pub username: Option<String>,
    /// 密码
    pub password: Option<String>,
    /// 请求超时
    pub request_timeout: Duration,

    // 索引配置
    /// 索引名前缀，用于按环境隔离；默认索引与查询显式指定的索引都会加上前缀
    pub index_prefix: Option<String>,
    /// 最大结果窗口（from + size 的上限）
    pub max_result_window: u64,
    /// 写入刷新策略
    pub refresh_policy: RefreshPolicy,

    // 重试配置
    /// 最大尝试次数
    pub retry_max_attempts: u32,
    /// 初始重试延迟
    pub retry_initial_delay: Duration,
    /// 最大重试延迟
    pub retry_max_delay: Duration,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["http://localhost:9200".to_string()],
            username: None,
            password: None,
            request_timeout: Duration::from_secs(30),
            index_prefix: None,
            max_result_window: 10_000,
            refresh_policy: RefreshPolicy::default(),
            retry_max_attempts: 3,
            retry_initial_delay: Duration::from_millis(100),
            retry_max_delay: Duration::from_secs(5),
        }
    }
}

impl ElasticsearchConfig {
    /// 创建新的配置
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// 设置认证信息
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// 设置请求超时
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// 设置索引前缀
    ///
    /// 查询中显式指定的索引名应当不带前缀
    pub fn with_index_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.index_prefix = Some(prefix.into());
        self
    }

    /// 设置最大结果窗口
    pub fn with_max_result_window(mut self, max_result_window: u64) -> Self {
        self.max_result_window = max_result_window;
        self
    }

    /// 设置写入刷新策略
    pub fn with_refresh_policy(mut self, refresh_policy: RefreshPolicy) -> Self {
        self.refresh_policy = refresh_policy;
        self
    }

    /// 设置重试配置
    pub fn with_retry(
        mut self,
        max_attempts: u32,
        initial_delay: Duration,
        max_delay: Duration,
    ) -> Self {
        self.retry_max_attempts = max_attempts;
        self.retry_initial_delay = initial_delay;
        self.retry_max_delay = max_delay;
        self
    }

    /// 是否配置了认证
    pub fn has_auth(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// 是否为多节点
    pub fn is_cluster(&self) -> bool {
        self.hosts.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ElasticsearchConfig::default();
        assert_eq!(config.hosts, vec!["http://localhost:9200"]);
        assert_eq!(config.max_result_window, 10_000);
        assert_eq!(config.refresh_policy, RefreshPolicy::None);
        assert!(!config.has_auth());
        assert!(!config.is_cluster());
    }

    #[test]
    fn test_config_builder() {
        let config = ElasticsearchConfig::new(["http://es1:9200", "http://es2:9200"])
            .with_auth("elastic", "changeme")
            .with_index_prefix("test-")
            .with_max_result_window(500)
            .with_refresh_policy(RefreshPolicy::WaitFor)
            .with_retry(5, Duration::from_millis(10), Duration::from_secs(1));

        assert!(config.is_cluster());
        assert!(config.has_auth());
        assert_eq!(config.index_prefix.as_deref(), Some("test-"));
        assert_eq!(config.max_result_window, 500);
        assert_eq!(config.retry_max_attempts, 5);
        assert_eq!(config.refresh_policy.as_param(), Some("wait_for"));
    }

    #[test]
    fn test_refresh_policy_param() {
        assert_eq!(RefreshPolicy::None.as_param(), None);
        assert_eq!(RefreshPolicy::Immediate.as_param(), Some("true"));
    }

    #[test]
    fn test_refresh_policy_from_str() {
        assert_eq!("wait_for".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::WaitFor);
        assert_eq!("TRUE".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::Immediate);
        assert!("sometimes".parse::<RefreshPolicy>().unwrap_err().is_invalid_argument());
    }
}
