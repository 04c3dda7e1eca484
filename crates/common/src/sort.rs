//! 排序定义
//!
//! 排序由若干 `Order` 组成，靠前的排序字段优先，后续字段只用于打破平局

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 升序
    #[default]
    #[display("asc")]
    Asc,
    /// 降序
    #[display("desc")]
    Desc,
}

impl Direction {
    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Asc)
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }

    /// 反向
    pub fn reverse(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// 空值排序策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullHandling {
    /// 交给搜索引擎决定
    #[default]
    Native,
    /// 空值排在最前
    NullsFirst,
    /// 空值排在最后
    NullsLast,
}

/// 单个排序条件
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    property: String,
    direction: Direction,
    #[serde(default)]
    null_handling: NullHandling,
}

impl Order {
    pub fn new(direction: Direction, property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction,
            null_handling: NullHandling::default(),
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(Direction::Asc, property)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(Direction::Desc, property)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn null_handling(&self) -> NullHandling {
        self.null_handling
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_null_handling(mut self, null_handling: NullHandling) -> Self {
        self.null_handling = null_handling;
        self
    }

    pub fn nulls_first(self) -> Self {
        self.with_null_handling(NullHandling::NullsFirst)
    }

    pub fn nulls_last(self) -> Self {
        self.with_null_handling(NullHandling::NullsLast)
    }
}

/// 排序
///
/// 合并两个排序时只做拼接，不去重也不重排
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// 空排序
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// 按给定字段升序
    pub fn by<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            orders: properties.into_iter().map(Order::asc).collect(),
        }
    }

    pub fn by_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }

    /// 把 `other` 的条件追加到当前条件之后
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    /// 全部改为升序
    pub fn ascending(self) -> Self {
        self.with_direction(Direction::Asc)
    }

    /// 全部改为降序
    pub fn descending(self) -> Self {
        self.with_direction(Direction::Desc)
    }

    fn with_direction(self, direction: Direction) -> Self {
        Self {
            orders: self
                .orders
                .into_iter()
                .map(|o| o.with_direction(direction))
                .collect(),
        }
    }

    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// 查找某个字段的排序条件（返回第一个匹配项）
    pub fn order_for(&self, property: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.property == property)
    }
}

impl From<Order> for Sort {
    fn from(order: Order) -> Self {
        Self {
            orders: vec![order],
        }
    }
}

impl FromIterator<Order> for Sort {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        Self::by_orders(iter)
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

impl IntoIterator for Sort {
    type Item = Order;
    type IntoIter = std::vec::IntoIter<Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.into_iter()
    }
}
