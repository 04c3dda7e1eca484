//! 搜索执行选项

use std::fmt;
use std::str::FromStr;

use docsearch_errors::AppError;
use serde::{Deserialize, Serialize};

/// 搜索策略
///
/// 控制分片之间如何协调匹配与打分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// 各分片独立打分后再取回文档
    QueryThenFetch,
    /// 先收集全局词频再打分，代价更高但评分更准确
    #[default]
    DfsQueryThenFetch,
}

impl SearchStrategy {
    /// 线上参数值
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueryThenFetch => "query_then_fetch",
            Self::DfsQueryThenFetch => "dfs_query_then_fetch",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query_then_fetch" => Ok(Self::QueryThenFetch),
            "dfs_query_then_fetch" => Ok(Self::DfsQueryThenFetch),
            other => Err(AppError::invalid_argument(format!(
                "Unknown search strategy: {}",
                other
            ))),
        }
    }
}

/// 通配符展开范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandWildcards {
    #[default]
    Open,
    Closed,
    Hidden,
    All,
    None,
}

impl ExpandWildcards {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Hidden => "hidden",
            Self::All => "all",
            Self::None => "none",
        }
    }
}

/// 索引可见性选项
///
/// 决定缺失、关闭或别名索引如何处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexVisibilityOptions {
    /// 忽略不可用（缺失或关闭）的索引
    pub ignore_unavailable: bool,
    /// 通配符或别名没有匹配任何索引时是否允许
    pub allow_no_indices: bool,
    /// 通配符展开范围
    pub expand_wildcards: ExpandWildcards,
}

impl IndexVisibilityOptions {
    /// 严格模式：任何缺失索引都会导致失败
    pub fn strict() -> Self {
        Self {
            ignore_unavailable: false,
            allow_no_indices: false,
            expand_wildcards: ExpandWildcards::Open,
        }
    }

    /// 宽松模式：跳过缺失和关闭的索引
    pub fn lenient() -> Self {
        Self {
            ignore_unavailable: true,
            allow_no_indices: true,
            expand_wildcards: ExpandWildcards::Open,
        }
    }

    pub fn with_expand_wildcards(mut self, expand_wildcards: ExpandWildcards) -> Self {
        self.expand_wildcards = expand_wildcards;
        self
    }
}

impl Default for IndexVisibilityOptions {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_is_dfs() {
        assert_eq!(SearchStrategy::default(), SearchStrategy::DfsQueryThenFetch);
        assert_eq!(SearchStrategy::default().as_str(), "dfs_query_then_fetch");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "QUERY_THEN_FETCH".parse::<SearchStrategy>().unwrap(),
            SearchStrategy::QueryThenFetch
        );
        assert!("scan".parse::<SearchStrategy>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_visibility_presets() {
        let strict = IndexVisibilityOptions::strict();
        assert!(!strict.ignore_unavailable);
        assert!(!strict.allow_no_indices);

        let lenient = IndexVisibilityOptions::lenient().with_expand_wildcards(ExpandWildcards::All);
        assert!(lenient.ignore_unavailable);
        assert_eq!(lenient.expand_wildcards.as_str(), "all");
    }
}
