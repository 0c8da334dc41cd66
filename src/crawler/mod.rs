//! Crawler module for listing traversal and record extraction
//!
//! This module contains the core scraping logic, including:
//! - Allowlist-gated, throttled HTTP fetching
//! - Listing page parsing (result links + next-page link)
//! - Detail page field extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
pub mod listing;
pub mod record;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, AllowlistGate, Fetcher};
pub use listing::{parse_listing, ListingPage};
pub use record::{parse_record, Field, FieldValue, Record};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl for one search
///
/// Builds the search URL from the keywords and year range, walks listing
/// pages up to `page_limit`, extracts every detail page reached, and
/// returns the records in traversal order.
///
/// # Arguments
///
/// * `config` - Site and fetch configuration
/// * `keywords` - Search terms, order preserved in the query
/// * `start_year` / `end_year` - Publication-date filter bounds
/// * `page_limit` - Maximum number of listing pages to visit
///
/// # Returns
///
/// * `Ok(Vec<Record>)` - One record per detail page visited
/// * `Err(ScrapeError)` - The first fetch or policy failure; records
///   gathered before the failure are dropped
pub async fn crawl(
    config: &Config,
    keywords: &[String],
    start_year: &str,
    end_year: &str,
    page_limit: u32,
) -> Result<Vec<Record>> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator
        .crawl(keywords, start_year, end_year, page_limit)
        .await
}
