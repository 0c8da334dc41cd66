use serde::Deserialize;

/// The production search site. Stored without a trailing slash; listing
/// hrefs are bare absolute paths and are appended directly to this.
pub const PUBMED_BASE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

/// Browser-style user agent sent with every request. The site's bot
/// filter rejects obviously non-browser agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Minimum delay between any two dispatched requests, in milliseconds.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Main configuration structure for PubSweep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetch: FetchConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the search site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// URL prefixes the scraper is permitted to fetch. Defaults to the
    /// base URL alone when left empty.
    #[serde(rename = "allowed-prefixes")]
    pub allowed_prefixes: Vec<String>,
}

/// Fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Minimum time between dispatched requests (milliseconds), measured
    /// process-wide, not per URL
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// User-Agent header value sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: PUBMED_BASE_URL.to_string(),
            allowed_prefixes: Vec::new(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Canonicalizes a freshly loaded configuration: trims the trailing
    /// slash from the base URL (listing hrefs start with one) and seeds
    /// the allowlist with the base URL when none was given.
    pub fn normalize(&mut self) {
        while self.site.base_url.len() > 1 && self.site.base_url.ends_with('/') {
            self.site.base_url.pop();
        }

        if self.site.allowed_prefixes.is_empty() {
            self.site.allowed_prefixes = vec![self.site.base_url.clone()];
        }
    }

    /// Builds a configuration targeting `base_url` with defaults for
    /// everything else. Used by tests to point the scraper at a mock
    /// server.
    pub fn for_site(base_url: &str) -> Self {
        let mut config = Self {
            site: SiteConfig {
                base_url: base_url.to_string(),
                allowed_prefixes: Vec::new(),
            },
            fetch: FetchConfig::default(),
        };
        config.normalize();
        config
    }
}
