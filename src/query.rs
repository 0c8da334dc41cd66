//! Search query construction
//!
//! A search is a sequence of keywords plus a publication-year range. The
//! query serializes deterministically: keywords keep their order and are
//! joined with `+`, and the year range becomes a `filter=years.S-E`
//! parameter. Keywords are assumed to already be URL-safe; no percent
//! encoding is applied.

/// An immutable search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keywords: Vec<String>,
    start_year: String,
    end_year: String,
}

impl SearchQuery {
    /// Creates a new search query
    ///
    /// # Arguments
    ///
    /// * `keywords` - Search terms, in the order they should appear
    /// * `start_year` - First year of the publication-date filter
    /// * `end_year` - Last year of the publication-date filter
    pub fn new<S: Into<String>>(
        keywords: impl IntoIterator<Item = S>,
        start_year: impl Into<String>,
        end_year: impl Into<String>,
    ) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            start_year: start_year.into(),
            end_year: end_year.into(),
        }
    }

    /// Serializes the query to a search-listing URL under `base_url`
    ///
    /// An empty keyword list produces an empty `term=` parameter; the
    /// site decides what that means.
    ///
    /// # Example
    ///
    /// ```
    /// use pubsweep::query::SearchQuery;
    ///
    /// let query = SearchQuery::new(["Asthma", "US"], "2023", "2024");
    /// assert_eq!(
    ///     query.url("https://pubmed.ncbi.nlm.nih.gov"),
    ///     "https://pubmed.ncbi.nlm.nih.gov/?term=Asthma+US&filter=years.2023-2024",
    /// );
    /// ```
    pub fn url(&self, base_url: &str) -> String {
        let term = self.keywords.join("+");
        format!(
            "{}/?term={}&filter=years.{}-{}",
            base_url, term, self.start_year, self.end_year
        )
    }
}
