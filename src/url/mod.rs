//! URL handling for PubSweep
//!
//! The site hands out three shapes of link: bare absolute paths
//! (`/12345/`), query-only fragments (`?term=x&page=2`), and full
//! absolute URLs. This module resolves the first two against the URL of
//! the page they appeared on.

mod resolve;

pub use resolve::resolve;
