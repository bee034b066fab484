//! Page requests and paged results for listing a collection by order.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Which members a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Skip disabled offers and suspended odds.
    #[default]
    ActiveOnly,
    /// Everything.
    All,
}

impl Visibility {
    #[must_use]
    pub fn from_include_disabled(include_disabled: bool) -> Self {
        if include_disabled {
            Visibility::All
        } else {
            Visibility::ActiveOnly
        }
    }

    #[must_use]
    pub fn admits(self, disabled: bool) -> bool {
        matches!(self, Visibility::All) || !disabled
    }
}

/// Validated `pageNumber`/`pageSize` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
    visibility: Visibility,
}

impl PageRequest {
    /// # Errors
    ///
    /// [`DomainError::Validation`] if either value is missing or below 1.
    pub fn new(
        page_number: Option<i64>,
        page_size: Option<i64>,
        visibility: Visibility,
    ) -> Result<Self, DomainError> {
        let page_number = at_least_one("pageNumber", page_number)?;
        let page_size = at_least_one("pageSize", page_size)?;
        Ok(Self {
            page_number,
            page_size,
            visibility,
        })
    }

    /// Reject page sizes above `max`.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] on `pageSize`.
    pub fn capped(self, max: i64) -> Result<Self, DomainError> {
        if self.page_size > max {
            return Err(DomainError::validation(
                "pageSize",
                format!("must be at most {max}"),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    /// `ceil(total / page_size)`.
    #[must_use]
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total - 1) / self.page_size + 1
    }
}

fn at_least_one(field: &'static str, value: Option<i64>) -> Result<i64, DomainError> {
    match value {
        None => Err(DomainError::validation(field, "is required")),
        Some(v) if v < 1 => Err(DomainError::validation(field, "must be at least 1")),
        Some(v) => Ok(v),
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(request: &PageRequest, items: Vec<T>, total_count: i64) -> Self {
        Self {
            items,
            current_page: request.page_number(),
            total_pages: request.total_pages(total_count),
            total_count,
        }
    }

    /// Convert the items, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}
