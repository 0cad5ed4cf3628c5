/// Position within a category's paginated listing
///
/// Page 1 is the bare category URL. Later pages append `?page=N` to the
/// category URL as-is, without merging into any query string it already has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    category_url: String,
    page: u32,
}

impl PaginationCursor {
    /// Creates a cursor positioned at page 1
    pub fn new(category_url: &str) -> Self {
        Self {
            category_url: category_url.to_string(),
            page: 1,
        }
    }

    /// Returns the current 1-indexed page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the URL of the current page
    ///
    /// # Examples
    ///
    /// ```
    /// use newsprint::PaginationCursor;
    ///
    /// let mut cursor = PaginationCursor::new("https://www.bbc.com/innovation");
    /// assert_eq!(cursor.page_url(), "https://www.bbc.com/innovation");
    /// cursor.advance();
    /// assert_eq!(cursor.page_url(), "https://www.bbc.com/innovation?page=2");
    /// ```
    pub fn page_url(&self) -> String {
        if self.page == 1 {
            self.category_url.clone()
        } else {
            format!("{}?page={}", self.category_url, self.page)
        }
    }

    /// Moves to the next page
    pub fn advance(&mut self) {
        self.page += 1;
    }
}
