//! Configuration module for PubSweep
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a built-in default, so a config file is only
//! needed to override the politeness delay, the user agent, or the target
//! site (the latter mostly useful for pointing tests at a mock server).
//!
//! # Example
//!
//! ```no_run
//! use pubsweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pubsweep.toml")).unwrap();
//! println!("Base URL: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, SiteConfig, PUBMED_BASE_URL};

// Re-export parser functions
pub use parser::load_config;

// Re-export validation
pub use validation::validate;
