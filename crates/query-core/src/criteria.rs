//! 条件查询
//!
//! 以链式方式描述字段条件，例如：
//!
//! ```
//! use docsearch_query_core::Criteria;
//!
//! let criteria = Criteria::field("price")
//!     .between(10, 20)
//!     .and("available")
//!     .is(true)
//!     .or("name")
//!     .starts_with("Sug");
//! assert_eq!(criteria.entries().len(), 3);
//! ```
//!
//! `and` 的优先级高于 `or`：上例等价于 `(price ∧ available) ∨ name`。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 条件之间的连接方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

/// 单个字段上的条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "value")]
pub enum Condition {
    Equals(Value),
    Between {
        lower: Option<Value>,
        upper: Option<Value>,
        include_lower: bool,
        include_upper: bool,
    },
    LessThan(Value),
    LessThanEqual(Value),
    GreaterThan(Value),
    GreaterThanEqual(Value),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    Expression(String),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Exists,
    Fuzzy(String),
}

/// 条件链中的一项：一个字段及其上的全部条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaEntry {
    pub field: String,
    pub conjunction: Conjunction,
    pub conditions: Vec<Condition>,
    pub negated: bool,
    pub boost: Option<f32>,
}

impl CriteriaEntry {
    fn new(field: impl Into<String>, conjunction: Conjunction) -> Self {
        Self {
            field: field.into(),
            conjunction,
            conditions: Vec::new(),
            negated: false,
            boost: None,
        }
    }
}

/// 条件链
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    entries: Vec<CriteriaEntry>,
}

impl Criteria {
    /// 以某个字段开始一条条件链
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            entries: vec![CriteriaEntry::new(name, Conjunction::And)],
        }
    }

    pub fn entries(&self) -> &[CriteriaEntry] {
        &self.entries
    }

    /// 以 AND 连接下一个字段
    pub fn and(mut self, name: impl Into<String>) -> Self {
        self.entries.push(CriteriaEntry::new(name, Conjunction::And));
        self
    }

    /// 以 OR 连接下一个字段
    pub fn or(mut self, name: impl Into<String>) -> Self {
        self.entries.push(CriteriaEntry::new(name, Conjunction::Or));
        self
    }

    /// 拼接另一条条件链，第一项以 AND 连接
    pub fn and_criteria(mut self, other: Criteria) -> Self {
        self.append(other, Conjunction::And);
        self
    }

    /// 拼接另一条条件链，第一项以 OR 连接
    pub fn or_criteria(mut self, other: Criteria) -> Self {
        self.append(other, Conjunction::Or);
        self
    }

    fn append(&mut self, other: Criteria, conjunction: Conjunction) {
        let mut entries = other.entries.into_iter();
        if let Some(mut first) = entries.next() {
            first.conjunction = conjunction;
            self.entries.push(first);
        }
        self.entries.extend(entries);
    }

    fn with_condition(mut self, condition: Condition) -> Self {
        if let Some(entry) = self.entries.last_mut() {
            entry.conditions.push(condition);
        }
        self
    }

    fn current(&mut self) -> Option<&mut CriteriaEntry> {
        self.entries.last_mut()
    }

    pub fn is(self, value: impl Into<Value>) -> Self {
        self.with_condition(Condition::Equals(value.into()))
    }

    /// 对当前字段取反
    pub fn not(mut self) -> Self {
        if let Some(entry) = self.current() {
            entry.negated = true;
        }
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        if let Some(entry) = self.current() {
            entry.boost = Some(boost);
        }
        self
    }

    /// 闭区间
    pub fn between(self, lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        self.with_condition(Condition::Between {
            lower: Some(lower.into()),
            upper: Some(upper.into()),
            include_lower: true,
            include_upper: true,
        })
    }

    pub fn less_than(self, value: impl Into<Value>) -> Self {
        self.with_condition(Condition::LessThan(value.into()))
    }

    pub fn less_than_equal(self, value: impl Into<Value>) -> Self {
        self.with_condition(Condition::LessThanEqual(value.into()))
    }

    pub fn greater_than(self, value: impl Into<Value>) -> Self {
        self.with_condition(Condition::GreaterThan(value.into()))
    }

    pub fn greater_than_equal(self, value: impl Into<Value>) -> Self {
        self.with_condition(Condition::GreaterThanEqual(value.into()))
    }

    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.with_condition(Condition::StartsWith(prefix.into()))
    }

    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.with_condition(Condition::EndsWith(suffix.into()))
    }

    pub fn contains(self, fragment: impl Into<String>) -> Self {
        self.with_condition(Condition::Contains(fragment.into()))
    }

    /// 原样交给搜索引擎解析的查询表达式
    pub fn expression(self, expression: impl Into<String>) -> Self {
        self.with_condition(Condition::Expression(expression.into()))
    }

    pub fn in_values<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_condition(Condition::In(values.into_iter().map(Into::into).collect()))
    }

    pub fn not_in<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_condition(Condition::NotIn(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn exists(self) -> Self {
        self.with_condition(Condition::Exists)
    }

    pub fn fuzzy(self, value: impl Into<String>) -> Self {
        self.with_condition(Condition::Fuzzy(value.into()))
    }

    /// 按 OR 切分成若干 AND 组
    pub fn groups(&self) -> Vec<&[CriteriaEntry]> {
        let mut groups = Vec::new();
        let mut start = 0;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > start && entry.conjunction == Conjunction::Or {
                groups.push(&self.entries[start..i]);
                start = i;
            }
        }
        if start < self.entries.len() {
            groups.push(&self.entries[start..]);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conditions_attach_to_last_field() {
        let criteria = Criteria::field("price")
            .greater_than_equal(10)
            .less_than(20)
            .and("name")
            .contains("sugar");

        let entries = criteria.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].conditions,
            vec![
                Condition::GreaterThanEqual(json!(10)),
                Condition::LessThan(json!(20)),
            ]
        );
        assert_eq!(entries[1].field, "name");
        assert_eq!(entries[1].conjunction, Conjunction::And);
    }

    #[test]
    fn test_not_and_boost() {
        let criteria = Criteria::field("available").is(false).not().boost(2.0);
        let entry = &criteria.entries()[0];
        assert!(entry.negated);
        assert_eq!(entry.boost, Some(2.0));
    }

    #[test]
    fn test_groups_split_on_or() {
        let criteria = Criteria::field("a")
            .is(1)
            .and("b")
            .is(2)
            .or("c")
            .is(3)
            .and("d")
            .is(4);

        let groups = criteria.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1][0].field, "c");
        assert_eq!(groups[1][1].field, "d");
    }

    #[test]
    fn test_append_criteria() {
        let criteria = Criteria::field("a")
            .is(1)
            .or_criteria(Criteria::field("b").is(2).and("c").is(3));

        let entries = criteria.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].conjunction, Conjunction::Or);
        assert_eq!(entries[2].conjunction, Conjunction::And);
        assert_eq!(criteria.groups().len(), 2);
    }

    #[test]
    fn test_in_values() {
        let criteria = Criteria::field("tag").in_values(["x", "y"]).and("id").not_in([1, 2]);
        assert_eq!(
            criteria.entries()[0].conditions,
            vec![Condition::In(vec![json!("x"), json!("y")])]
        );
        assert_eq!(
            criteria.entries()[1].conditions,
            vec![Condition::NotIn(vec![json!(1), json!(2)])]
        );
    }
}
