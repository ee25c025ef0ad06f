/// Page size the admin list views use unless a profile overrides it.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Optional id filter applied to a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Category(u32),
    Role(u32),
}

/// One page worth of list-request parameters.
///
/// Rebuilt from scratch on every filter change; `page` is always >= 1 and
/// `page_size` is fixed per list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub filter: Option<ListFilter>,
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            search: None,
            filter: None,
        }
    }

    pub fn first_page(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// Blank or whitespace-only search terms are dropped entirely.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn at_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Records skipped by earlier pages, widened to `u64` so an absurd page
    /// number cannot overflow the multiplication.
    pub fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Wire parameters: `skip`, `limit`, optional `search` and id filter.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip().to_string()),
            ("limit", self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        match self.filter {
            Some(ListFilter::Category(id)) => pairs.push(("category_id", id.to_string())),
            Some(ListFilter::Role(id)) => pairs.push(("role_id", id.to_string())),
            None => {}
        }
        pairs
    }
}
