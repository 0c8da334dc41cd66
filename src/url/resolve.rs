use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a possibly-relative link against the URL of the page that
/// contained it
///
/// # Resolution Rules
///
/// 1. Candidate starts with `/` (absolute path): keep the base's scheme
///    and authority, discard its path and query.
/// 2. Candidate starts with `?` (query fragment): keep the base's scheme,
///    authority, and path, discard its existing query.
/// 3. Anything else is returned unchanged, treated as already absolute.
///    No `../` resolution is performed; the site never emits such links.
///
/// # Arguments
///
/// * `candidate` - The link as it appeared on the page
/// * `base` - The absolute URL of the page the link appeared on
///
/// # Returns
///
/// * `Ok(String)` - The absolute URL
/// * `Err(UrlError)` - The base could not be parsed or has no host
///
/// # Examples
///
/// ```
/// use pubsweep::url::resolve;
///
/// let url = resolve("?page=2", "https://pubmed.ncbi.nlm.nih.gov/search").unwrap();
/// assert_eq!(url, "https://pubmed.ncbi.nlm.nih.gov/search?page=2");
/// ```
pub fn resolve(candidate: &str, base: &str) -> UrlResult<String> {
    if !candidate.starts_with('/') && !candidate.starts_with('?') {
        return Ok(candidate.to_string());
    }

    let parsed = Url::parse(base).map_err(|e| UrlError::Parse {
        url: base.to_string(),
        message: e.to_string(),
    })?;

    let host = parsed
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(base.to_string()))?;

    let mut origin = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        origin.push_str(&format!(":{}", port));
    }

    if candidate.starts_with('/') {
        Ok(format!("{}{}", origin, candidate))
    } else {
        Ok(format!("{}{}{}", origin, parsed.path(), candidate))
    }
}
