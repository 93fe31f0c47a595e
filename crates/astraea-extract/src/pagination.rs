//! Pagination values.
//!
//! [`Pageable`] carries validated 1-based paging input; [`Page`] wraps one
//! page of results with its totals for serialization.

use astraea_core::{BizCode, BizError, BizResult};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Default upper bound for the page size.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1000;

/// Validated paging input: a 1-based page number and a page size.
///
/// # Example
///
/// ```rust
/// use astraea_extract::Pageable;
///
/// let pageable = Pageable::new(3, 20).unwrap();
/// assert_eq!(pageable.offset(), 40);
/// assert_eq!(pageable.begin(), 41);
/// assert_eq!(pageable.end(), 60);
///
/// assert!(Pageable::new(0, 20).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pageable {
    page: u32,
    size: u32,
}

impl Pageable {
    /// Validates `page` and `size` against [`DEFAULT_MAX_PAGE_SIZE`].
    pub fn new(page: u32, size: u32) -> BizResult<Self> {
        Self::with_max_size(page, size, DEFAULT_MAX_PAGE_SIZE)
    }

    /// Validates `page` and `size` against a custom size cap. The size must
    /// be strictly below `max_size`.
    pub fn with_max_size(page: u32, size: u32, max_size: u32) -> BizResult<Self> {
        if page < 1 {
            return Err(BizError::with_message(
                BizCode::PARAM,
                "page must be greater than 0",
            ));
        }
        if size < 1 {
            return Err(BizError::with_message(
                BizCode::PARAM,
                "size must be greater than 0",
            ));
        }
        if size >= max_size {
            return Err(BizError::with_message(
                BizCode::PARAM,
                format!("size must be less than {max_size}"),
            ));
        }
        Ok(Self { page, size })
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of rows before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }

    /// Returns the 1-based first row of this page.
    #[must_use]
    pub const fn begin(&self) -> u64 {
        self.offset() + 1
    }

    /// Returns the 1-based last row of this page.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.offset() + self.size as u64
    }
}

/// One page of results together with the total item count.
///
/// Serializes as `{"total_items": …, "total_pages": …, "items": […]}`; the
/// paging input itself is not part of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total_items: u64,
    pageable: Pageable,
}

impl<T> Page<T> {
    /// Creates a page of `items` out of `total_items` matches.
    #[must_use]
    pub fn new(items: Vec<T>, total_items: u64, pageable: Pageable) -> Self {
        Self {
            items,
            total_items,
            pageable,
        }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the total number of matching items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Returns the paging input this page was produced for.
    #[must_use]
    pub const fn pageable(&self) -> Pageable {
        self.pageable
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.pageable.size() as u64)
    }

    /// Consumes the page and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 3)?;
        state.serialize_field("total_items", &self.total_items)?;
        state.serialize_field("total_pages", &self.total_pages())?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}
