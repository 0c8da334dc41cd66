//! Listing page parsing
//!
//! A listing page is one page of search results: an ordered set of links
//! to detail pages, plus an optional pointer to the next page of
//! results. Parsing is pure; fetching happens in the coordinator.

use crate::url::resolve;
use crate::{Result, ScrapeError};
use scraper::{Html, Selector};

/// Result-summary anchors; their hrefs are bare absolute paths.
const DETAIL_LINK_SELECTOR: &str = "a.docsum-title";

/// Results container carrying the next-page pointer as a data attribute.
const RESULTS_CHUNK_SELECTOR: &str = "div.search-results-chunk.results-chunk";
const NEXT_PAGE_ATTR: &str = "data-next-page-url";

/// One parsed listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute detail-page URLs, in page order
    pub detail_links: Vec<String>,

    /// Absolute URL of the next listing page; `None` means the results
    /// are exhausted
    pub next_page_url: Option<String>,
}

/// Parses a listing page body
///
/// Detail links are produced by appending each result anchor's href to
/// `base_url` directly; the site emits them as bare absolute paths, so
/// no general resolution is needed. The next-page pointer, by contrast,
/// arrives as a query fragment (`?term=...&page=2`) and is resolved
/// against the URL of the listing page it appeared on.
///
/// # Arguments
///
/// * `html` - The listing page response body
/// * `page_url` - The URL this body was fetched from
/// * `base_url` - The site base URL, without a trailing slash
///
/// # Returns
///
/// * `Ok(ListingPage)` - Parsed links
/// * `Err(ScrapeError)` - A structural selector failed to compile, or
///   the next-page pointer could not be resolved
pub fn parse_listing(html: &str, page_url: &str, base_url: &str) -> Result<ListingPage> {
    let document = Html::parse_document(html);

    let anchors = compile(DETAIL_LINK_SELECTOR)?;
    let detail_links = document
        .select(&anchors)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| format!("{}{}", base_url, href))
        .collect();

    let chunk = compile(RESULTS_CHUNK_SELECTOR)?;
    let next_page_url = document
        .select(&chunk)
        .next()
        .and_then(|element| element.value().attr(NEXT_PAGE_ATTR))
        .map(|raw| resolve(raw, page_url))
        .transpose()?;

    Ok(ListingPage {
        detail_links,
        next_page_url,
    })
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
