//! 条件查询到查询 DSL 的转换
//!
//! OR 切分出的每组条件放进 `bool.should`，组内条件放进 `bool.must`
//! （取反的放进 `must_not`）。只有一组时省略外层的 `should`。

use docsearch_query_core::{Condition, Criteria, CriteriaEntry};
use serde_json::{Map, Value, json};

/// 需要在 query_string 中转义的字符
const RESERVED_CHARS: &[char] = &[
    '\\', '+', '-', '=', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|',
    '&', '/', ' ',
];

/// 无法转义、只能删除的字符
const REMOVED_CHARS: &[char] = &['<', '>'];

/// 转换条件链
pub fn criteria_to_dsl(criteria: &Criteria) -> Value {
    let mut groups: Vec<Value> = criteria.groups().into_iter().map(group_to_dsl).collect();

    match groups.len() {
        0 => json!({ "match_all": {} }),
        1 => groups.remove(0),
        _ => json!({
            "bool": {
                "should": groups,
                "minimum_should_match": 1
            }
        }),
    }
}

fn group_to_dsl(entries: &[CriteriaEntry]) -> Value {
    let mut must = Vec::new();
    let mut must_not = Vec::new();

    for entry in entries {
        let query = entry_to_dsl(entry);
        if entry.negated {
            must_not.push(query);
        } else {
            must.push(query);
        }
    }

    let mut clauses = Map::new();
    if !must.is_empty() {
        clauses.insert("must".to_string(), Value::Array(must));
    }
    if !must_not.is_empty() {
        clauses.insert("must_not".to_string(), Value::Array(must_not));
    }

    json!({ "bool": clauses })
}

/// 单个字段：多个条件或带权重时包一层 `bool.must`
fn entry_to_dsl(entry: &CriteriaEntry) -> Value {
    let field = entry.field.as_str();

    let mut queries: Vec<Value> = if entry.conditions.is_empty() {
        vec![json!({ "exists": { "field": field } })]
    } else {
        entry
            .conditions
            .iter()
            .map(|condition| condition_to_dsl(field, condition))
            .collect()
    };

    match (queries.len(), entry.boost) {
        (1, None) => queries.remove(0),
        (_, boost) => {
            let mut clauses = Map::new();
            clauses.insert("must".to_string(), Value::Array(queries));
            if let Some(boost) = boost {
                clauses.insert("boost".to_string(), json!(boost));
            }
            json!({ "bool": clauses })
        }
    }
}

fn condition_to_dsl(field: &str, condition: &Condition) -> Value {
    match condition {
        Condition::Equals(Value::String(text)) => json!({
            "match": { field: { "query": text, "operator": "and" } }
        }),
        Condition::Equals(value) => json!({ "term": { field: value } }),
        Condition::Between {
            lower,
            upper,
            include_lower,
            include_upper,
        } => {
            let mut range = Map::new();
            if let Some(lower) = lower {
                let key = if *include_lower { "gte" } else { "gt" };
                range.insert(key.to_string(), lower.clone());
            }
            if let Some(upper) = upper {
                let key = if *include_upper { "lte" } else { "lt" };
                range.insert(key.to_string(), upper.clone());
            }
            json!({ "range": { field: range } })
        }
        Condition::LessThan(value) => json!({ "range": { field: { "lt": value } } }),
        Condition::LessThanEqual(value) => json!({ "range": { field: { "lte": value } } }),
        Condition::GreaterThan(value) => json!({ "range": { field: { "gt": value } } }),
        Condition::GreaterThanEqual(value) => json!({ "range": { field: { "gte": value } } }),
        Condition::StartsWith(prefix) => wildcard_query(field, &format!("{}*", escape(prefix))),
        Condition::EndsWith(suffix) => wildcard_query(field, &format!("*{}", escape(suffix))),
        Condition::Contains(fragment) => {
            wildcard_query(field, &format!("*{}*", escape(fragment)))
        }
        Condition::Expression(expression) => json!({
            "query_string": { "query": expression, "fields": [field] }
        }),
        Condition::In(values) => json!({ "terms": { field: values } }),
        Condition::NotIn(values) => json!({
            "bool": { "must_not": [{ "terms": { field: values } }] }
        }),
        Condition::Exists => json!({ "exists": { "field": field } }),
        Condition::Fuzzy(value) => json!({ "fuzzy": { field: { "value": value } } }),
    }
}

fn wildcard_query(field: &str, pattern: &str) -> Value {
    json!({
        "query_string": {
            "query": pattern,
            "fields": [field],
            "analyze_wildcard": true
        }
    })
}

/// 转义 query_string 保留字符，并删除 `<` 和 `>`
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if REMOVED_CHARS.contains(&c) {
            continue;
        }
        if RESERVED_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
