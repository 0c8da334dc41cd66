//! Crawl coordination
//!
//! The coordinator drives the whole run: build the search URL once, then
//! read listing pages one at a time, extracting every detail page a
//! listing points at before moving to the next page. All fetching goes
//! through the throttled, allowlist-gated fetcher; execution is strictly
//! sequential with one outstanding request at a time.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::listing::{parse_listing, ListingPage};
use crate::crawler::record::{parse_record, Record};
use crate::query::SearchQuery;
use crate::Result;

/// Drives a crawl for one search query
pub struct Coordinator {
    fetcher: Fetcher,
    base_url: String,
}

impl Coordinator {
    /// Creates a coordinator from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(ScrapeError)` - Failed to build the HTTP client
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            base_url: config.site.base_url.clone(),
        })
    }

    /// Runs the crawl loop
    ///
    /// An absent next-page URL is the primary termination signal; the
    /// page counter is checked after increment and before the fetch, so
    /// `page_limit = N` performs at most N listing fetches and a
    /// naturally exhausted run never attempts a fetch without a URL.
    /// `page_limit` bounds listing pages visited, not records collected.
    ///
    /// # Arguments
    ///
    /// * `keywords` - Search terms, order preserved
    /// * `start_year` / `end_year` - Publication-date filter bounds
    /// * `page_limit` - Maximum listing pages to visit
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Record>)` - Records in listing-then-detail traversal order
    /// * `Err(ScrapeError)` - The first failure; nothing is skipped or
    ///   retried, and already-gathered records are dropped with the error
    pub async fn crawl(
        &mut self,
        keywords: &[String],
        start_year: &str,
        end_year: &str,
        page_limit: u32,
    ) -> Result<Vec<Record>> {
        let query = SearchQuery::new(keywords.iter().cloned(), start_year, end_year);
        let mut current_url = Some(query.url(&self.base_url));

        let mut pages_visited: u32 = 0;
        let mut records = Vec::new();

        while let Some(url) = current_url {
            pages_visited += 1;
            if pages_visited > page_limit {
                tracing::info!("Page limit of {} reached, stopping", page_limit);
                break;
            }

            tracing::info!("Reading listing page {}: {}", pages_visited, url);
            let listing = self.read_listing(&url).await?;
            tracing::debug!("{} result link(s) on this page", listing.detail_links.len());

            for link in &listing.detail_links {
                records.push(self.extract_record(link).await?);
            }

            if listing.next_page_url.is_none() {
                tracing::info!("No next-page link, results exhausted");
            }
            current_url = listing.next_page_url;
        }

        tracing::info!("Crawl finished with {} record(s)", records.len());
        Ok(records)
    }

    /// Fetches and parses one listing page
    async fn read_listing(&mut self, url: &str) -> Result<ListingPage> {
        let body = self.fetcher.fetch(url).await?;
        parse_listing(&body, url, &self.base_url)
    }

    /// Fetches and parses one detail page
    async fn extract_record(&mut self, url: &str) -> Result<Record> {
        let body = self.fetcher.fetch(url).await?;
        Ok(parse_record(&body))
    }
}
