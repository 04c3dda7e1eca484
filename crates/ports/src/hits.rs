//! 搜索结果

use docsearch_common::{PagedResult, Pagination};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 总数的精确程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalRelation {
    /// 精确值
    #[default]
    Equal,
    /// 下界（搜索引擎停止了计数）
    GreaterThanOrEqual,
}

/// 单条命中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit<T> {
    /// 文档 ID
    pub id: String,
    /// 所在索引
    pub index: String,
    /// 相关性评分（按非评分字段排序且未开启 track_scores 时为空）
    pub score: Option<f32>,
    /// 排序值
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort_values: Vec<Value>,
    /// 路由
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>,
    /// 文档内容
    pub content: T,
}

impl<T> SearchHit<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SearchHit<U> {
        SearchHit {
            id: self.id,
            index: self.index,
            score: self.score,
            sort_values: self.sort_values,
            routing: self.routing,
            content: f(self.content),
        }
    }
}

/// 命中集合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHits<T> {
    pub total: u64,
    pub total_relation: TotalRelation,
    pub max_score: Option<f32>,
    pub hits: Vec<SearchHit<T>>,
}

impl<T> Default for SearchHits<T> {
    fn default() -> Self {
        Self {
            total: 0,
            total_relation: TotalRelation::Equal,
            max_score: None,
            hits: Vec::new(),
        }
    }
}

impl<T> SearchHits<T> {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchHit<T>> {
        self.hits.iter()
    }

    /// 只保留文档内容
    pub fn into_contents(self) -> Vec<T> {
        self.hits.into_iter().map(|h| h.content).collect()
    }

    /// 转换为分页结果
    pub fn into_page(self, pagination: &Pagination) -> PagedResult<T> {
        let total = self.total;
        PagedResult::new(self.into_contents(), total, pagination)
    }
}

impl<T> IntoIterator for SearchHits<T> {
    type Item = SearchHit<T>;
    type IntoIter = std::vec::IntoIter<SearchHit<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, content: u32) -> SearchHit<u32> {
        SearchHit {
            id: id.to_string(),
            index: "numbers".to_string(),
            score: Some(1.0),
            sort_values: Vec::new(),
            routing: None,
            content,
        }
    }

    #[test]
    fn test_into_page() {
        let hits = SearchHits {
            total: 42,
            total_relation: TotalRelation::Equal,
            max_score: Some(1.0),
            hits: vec![hit("1", 10), hit("2", 20)],
        };

        let page = hits.into_page(&Pagination::new(1, 2).unwrap());
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 42);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages(), 21);
    }

    #[test]
    fn test_hit_map() {
        let mapped = hit("7", 3).map(|n| n.to_string());
        assert_eq!(mapped.id, "7");
        assert_eq!(mapped.content, "3");
    }

    #[test]
    fn test_default_is_empty() {
        let hits: SearchHits<u32> = SearchHits::default();
        assert!(hits.is_empty());
        assert_eq!(hits.total, 0);
    }
}
