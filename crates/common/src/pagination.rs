//! 分页定义

use docsearch_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::sort::Sort;

/// 默认分页大小
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 分页参数
///
/// 页码从 0 开始，分页大小必须大于 0。分页可以携带一个排序，
/// 设置到查询上时该排序会并入查询自身的排序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPagination")]
pub struct Pagination {
    page: u32,
    size: u32,
    #[serde(default)]
    sort: Sort,
}

#[derive(Deserialize)]
struct RawPagination {
    page: u32,
    size: u32,
    #[serde(default)]
    sort: Sort,
}

impl TryFrom<RawPagination> for Pagination {
    type Error = AppError;

    fn try_from(raw: RawPagination) -> AppResult<Self> {
        Pagination::sorted(raw.page, raw.size, raw.sort)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::unsorted(),
        }
    }
}

impl Pagination {
    /// 创建无排序分页
    pub fn new(page: u32, size: u32) -> AppResult<Self> {
        Self::sorted(page, size, Sort::unsorted())
    }

    /// 创建带排序分页
    pub fn sorted(page: u32, size: u32, sort: Sort) -> AppResult<Self> {
        if size == 0 {
            return Err(AppError::invalid_argument(
                "Page size must not be less than one",
            ));
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// 偏移量
    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    pub fn previous_or_first(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self.clone()
        }
    }

    pub fn first(&self) -> Self {
        Self {
            page: 0,
            ..self.clone()
        }
    }

    /// 替换排序
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page(),
            page_size: pagination.size(),
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64 + 1) < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
