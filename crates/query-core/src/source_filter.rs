//! 源文档过滤

use serde::{Deserialize, Serialize};

/// 源文档字段过滤
///
/// 字段名支持通配符，由搜索引擎解释
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

impl SourceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加包含字段
    pub fn with_includes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(fields.into_iter().map(Into::into));
        self
    }

    /// 添加排除字段
    pub fn with_excludes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let filter = SourceFilter::new()
            .with_includes(["title", "author.*"])
            .with_excludes(["internal_*"]);

        assert_eq!(filter.includes, vec!["title", "author.*"]);
        assert_eq!(filter.excludes, vec!["internal_*"]);
        assert!(!filter.is_empty());
        assert!(SourceFilter::new().is_empty());
    }

    #[test]
    fn test_serialize_skips_empty() {
        let json = serde_json::to_value(SourceFilter::new().with_includes(["title"])).unwrap();
        assert_eq!(json, serde_json::json!({ "includes": ["title"] }));
    }
}
