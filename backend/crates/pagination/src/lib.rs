//! Page-number pagination primitives shared by backend list endpoints.
//!
//! Endpoints receive a page number and page size from the query string,
//! validate them into a [`PageRequest`], and slice an already materialised
//! result set into a [`Page`] envelope:
//!
//! ```json
//! {
//!   "data": [],
//!   "pagination": { "page": 1, "pageSize": 50, "totalItems": 0, "totalPages": 0 },
//!   "links": { "self": "https://example.test/items?page=1&pageSize=50" }
//! }
//! ```
//!
//! The crate is transport agnostic: it knows nothing about Actix or the
//! backend domain, only about slicing vectors and describing the slice.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Page number used when the client does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the client does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

const PAGE_PARAM: &str = "page";
const PAGE_SIZE_PARAM: &str = "pageSize";

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be at least 1 (got {value})")]
    PageOutOfRange {
        /// Rejected page number.
        value: u32,
    },
    /// Page size must fall within `1..=MAX_PAGE_SIZE`.
    #[error("page size must be between 1 and {max} (got {value})")]
    PageSizeOutOfRange {
        /// Rejected page size.
        value: u32,
        /// Largest accepted page size.
        max: u32,
    },
}

impl PageRequestError {
    /// Query parameter name the error refers to.
    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        match self {
            Self::PageOutOfRange { .. } => PAGE_PARAM,
            Self::PageSizeOutOfRange { .. } => PAGE_SIZE_PARAM,
        }
    }
}

/// Validated page coordinates.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_size <= MAX_PAGE_SIZE`
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 10).expect("valid page");
/// let page = request.paginate((1..=25).collect::<Vec<u32>>());
/// assert_eq!(page.data, (11..=20).collect::<Vec<u32>>());
/// assert_eq!(page.pagination.total_pages, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate explicit page coordinates.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either value is out of range.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page < 1 {
            return Err(PageRequestError::PageOutOfRange { value: page });
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeOutOfRange {
                value: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, page_size })
    }

    /// Validate optional query values, substituting defaults for absent ones.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a supplied value is out of range.
    pub fn from_query(page: Option<u32>, page_size: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    fn limit(self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }

    fn offset(self) -> usize {
        let skipped = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }

    /// Slice `items` down to this page and describe the slice.
    ///
    /// Pages past the end of the collection are empty rather than an error.
    #[must_use]
    pub fn paginate<T>(self, items: Vec<T>) -> Page<T> {
        let total_items = items.len();
        let data = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect();
        Page {
            data,
            pagination: PageInfo {
                page: self.page,
                page_size: self.page_size,
                total_items,
                total_pages: total_items.div_ceil(self.limit()),
            },
            links: None,
        }
    }
}

/// Position of a page within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// One-based page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Number of items across all pages.
    pub total_items: usize,
    /// Number of non-empty pages.
    pub total_pages: usize,
}

impl PageInfo {
    fn has_next(&self) -> bool {
        usize::try_from(self.page).is_ok_and(|page| page < self.total_pages)
    }

    const fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Navigation links for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Link to the current page.
    #[serde(rename = "self")]
    pub current: String,
    /// Link to the following page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Link to the preceding page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Response envelope for paginated collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Where this page sits in the collection.
    pub pagination: PageInfo,
    /// Navigation links, present once [`Page::with_links`] has been applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl<T> Page<T> {
    /// Transform every item while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
            links: self.links,
        }
    }

    /// Attach navigation links derived from the request URL.
    ///
    /// Existing `page` and `pageSize` parameters on `base` are replaced; all
    /// other query parameters (filters, search terms) are preserved.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.test/items?field=name&page=9").expect("url");
    /// let page = PageRequest::new(1, 2)
    ///     .expect("valid page")
    ///     .paginate(vec![1, 2, 3])
    ///     .with_links(&base);
    /// let links = page.links.expect("links");
    /// assert_eq!(
    ///     links.next.as_deref(),
    ///     Some("https://example.test/items?field=name&page=2&pageSize=2"),
    /// );
    /// assert!(links.prev.is_none());
    /// ```
    #[must_use]
    pub fn with_links(mut self, base: &Url) -> Self {
        let info = self.pagination;
        let link_to = |page: u32| page_url(base, page, info.page_size);
        self.links = Some(PageLinks {
            current: link_to(info.page),
            next: info.has_next().then(|| link_to(info.page.saturating_add(1))),
            prev: info.has_prev().then(|| link_to(info.page - 1)),
        });
        self
    }
}

fn page_url(base: &Url, page: u32, page_size: u32) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM && key != PAGE_SIZE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &page.to_string())
        .append_pair(PAGE_SIZE_PARAM, &page_size.to_string());
    url.into()
}
