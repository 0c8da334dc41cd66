//! HTTP fetching for the scraper
//!
//! This module handles all network I/O, including:
//! - Building the HTTP client with a browser-style user agent
//! - Checking every target against the URL allowlist before any I/O
//! - Enforcing the process-wide minimum delay between requests
//! - Surfacing non-2xx responses as errors, with the status preserved
//!
//! There is no retry logic. Fetching is strictly sequential: the fetcher
//! owns the last-dispatch timestamp and takes `&mut self`, so a second
//! request cannot be issued while one is outstanding.

use crate::config::Config;
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::time::{Duration, Instant};

/// Rejects fetch targets that are not under a permitted URL prefix
///
/// Every URL the scraper visits (listing pages, detail pages, resolved
/// next-page links) goes through `check` before any network I/O. A
/// rejection is a configuration or programming error, not a condition to
/// recover from.
#[derive(Debug, Clone)]
pub struct AllowlistGate {
    prefixes: Vec<String>,
}

impl AllowlistGate {
    /// Creates a gate from a set of absolute URL prefixes
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Accepts a URL only if it starts with one of the allowed prefixes
    ///
    /// # Returns
    ///
    /// * `Ok(&str)` - The URL, unchanged
    /// * `Err(ScrapeError::PolicyViolation)` - URL is outside the allowlist
    pub fn check<'a>(&self, url: &'a str) -> Result<&'a str> {
        if self.prefixes.iter().any(|p| url.starts_with(p.as_str())) {
            Ok(url)
        } else {
            Err(ScrapeError::PolicyViolation {
                url: url.to_string(),
            })
        }
    }
}

/// Builds the HTTP client used for all requests
///
/// # Arguments
///
/// * `user_agent` - User-Agent header value; the site's bot filter
///   expects a browser-style string
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Throttled, allowlist-gated fetcher
///
/// Owns the HTTP client, the allowlist gate, and the timestamp of the
/// last dispatched request. The delay is measured from the previous
/// dispatch regardless of target URL: this is politeness toward one
/// external service, not per-resource rate limiting.
pub struct Fetcher {
    client: Client,
    gate: AllowlistGate,
    delay: Duration,
    last_dispatch: Option<Instant>,
}

impl Fetcher {
    /// Creates a fetcher from the configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client =
            build_http_client(&config.fetch.user_agent).map_err(ScrapeError::Client)?;

        Ok(Self {
            client,
            gate: AllowlistGate::new(config.site.allowed_prefixes.clone()),
            delay: Duration::from_millis(config.fetch.request_delay_ms),
            last_dispatch: None,
        })
    }

    /// Fetches a URL and returns the response body
    ///
    /// The allowlist check runs first; a denied URL performs no I/O and
    /// does not advance the throttle clock. Otherwise the call sleeps
    /// out whatever remains of the minimum delay since the previous
    /// dispatch, issues one GET, and fails fast on a non-2xx status.
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The response body
    /// * `Err(ScrapeError)` - Policy violation, transport failure, or
    ///   non-2xx status
    pub async fn fetch(&mut self, url: &str) -> Result<String> {
        self.gate.check(url)?;

        if let Some(last) = self.last_dispatch {
            let since = last.elapsed();
            if since < self.delay {
                tokio::time::sleep(self.delay - since).await;
            }
        }
        self.last_dispatch = Some(Instant::now());

        tracing::info!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ScrapeError::Request {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher(base_url: &str, delay_ms: u64) -> Fetcher {
        let mut config = Config::for_site(base_url);
        config.fetch.request_delay_ms = delay_ms;
        config.fetch.user_agent = "TestAgent/1.0".to_string();
        Fetcher::new(&config).unwrap()
    }

    #[test]
    fn gate_returns_allowed_url_unchanged() {
        let gate = AllowlistGate::new(vec!["https://pubmed.ncbi.nlm.nih.gov".to_string()]);
        assert_eq!(
            gate.check("https://pubmed.ncbi.nlm.nih.gov/12345/").unwrap(),
            "https://pubmed.ncbi.nlm.nih.gov/12345/",
        );
    }

    #[test]
    fn gate_rejects_other_host() {
        let gate = AllowlistGate::new(vec!["https://pubmed.ncbi.nlm.nih.gov".to_string()]);

        let err = gate.check("https://other.site/12345/").unwrap_err();
        assert!(matches!(err, ScrapeError::PolicyViolation { .. }));
    }

    #[test]
    fn gate_rejects_prefix_elsewhere_in_url() {
        let gate = AllowlistGate::new(vec!["https://pubmed.ncbi.nlm.nih.gov".to_string()]);

        assert!(gate
            .check("https://evil.example/https://pubmed.ncbi.nlm.nih.gov")
            .is_err());
    }

    #[test]
    fn gate_checks_all_prefixes() {
        let gate = AllowlistGate::new(vec![
            "https://pubmed.ncbi.nlm.nih.gov".to_string(),
            "http://127.0.0.1:9000".to_string(),
        ]);

        assert!(gate.check("http://127.0.0.1:9000/1/").is_ok());
        assert!(gate.check("http://127.0.0.1:9001/1/").is_err());
    }

    #[test]
    fn client_builds_with_browser_agent() {
        assert!(build_http_client("Mozilla/5.0 test").is_ok());
    }

    #[tokio::test]
    async fn fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let mut fetcher = test_fetcher(&server.uri(), 0);
        let body = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn fetch_sends_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ua"))
            .and(header("user-agent", "TestAgent/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let mut fetcher = test_fetcher(&server.uri(), 0);
        fetcher.fetch(&format!("{}/ua", server.uri())).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut fetcher = test_fetcher(&server.uri(), 0);
        let err = fetcher
            .fetch(&format!("{}/gone", server.uri()))
            .await
            .unwrap_err();

        match err {
            ScrapeError::Status { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/gone"));
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn denied_url_performs_no_io() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = Config::for_site(&server.uri());
        config.site.allowed_prefixes = vec!["https://pubmed.ncbi.nlm.nih.gov".to_string()];
        let mut fetcher = Fetcher::new(&config).unwrap();

        let err = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap_err();
        assert!(matches!(err, ScrapeError::PolicyViolation { .. }));
    }

    #[tokio::test]
    async fn consecutive_fetches_respect_the_delay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let mut fetcher = test_fetcher(&server.uri(), 80);
        let url = format!("{}/timed", server.uri());

        let start = Instant::now();
        fetcher.fetch(&url).await.unwrap();
        fetcher.fetch(&url).await.unwrap();
        fetcher.fetch(&url).await.unwrap();

        // Two inter-request gaps of at least 80ms each
        assert!(start.elapsed() >= Duration::from_millis(160));
    }

    #[tokio::test]
    async fn first_fetch_is_not_delayed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let mut fetcher = test_fetcher(&server.uri(), 5000);

        let start = Instant::now();
        fetcher.fetch(&format!("{}/once", server.uri())).await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(4000));
    }
}
