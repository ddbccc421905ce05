use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for paginated listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page_index")]
    pub page_index: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_index() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page_index: default_page_index(),
            page_size: default_page_size(),
        }
    }
}

impl PageParams {
    pub fn new(page_index: u32, page_size: u32) -> Result<Self> {
        let params = Self {
            page_index,
            page_size,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_index < 1 {
            return Err(AppError::validation("page_index must be at least 1"));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page_index.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// One page of a listing plus navigation info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, params: PageParams) -> Self {
        let page_size = u64::from(params.page_size.max(1));
        let total_pages = total_count.div_ceil(page_size);

        Self {
            items,
            total_count,
            page_index: params.page_index,
            page_size: params.page_size,
            total_pages,
            has_previous: params.page_index > 1,
            has_next: u64::from(params.page_index) < total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_index: self.page_index,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}
