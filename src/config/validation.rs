use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a normalized configuration
///
/// Checks that:
/// - the base URL parses and uses an http(s) scheme with a host
/// - every allowlist prefix is a non-empty absolute URL prefix
/// - the base URL itself is covered by the allowlist (otherwise the very
///   first request would be rejected at runtime)
/// - the user agent is non-empty
///
/// # Arguments
///
/// * `config` - The configuration to validate (after `Config::normalize`)
///
/// # Returns
///
/// * `Ok(())` - Configuration is valid
/// * `Err(ConfigError::Validation)` - A check failed
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let base = Url::parse(&config.site.base_url)
        .map_err(|e| ConfigError::Validation(format!("invalid base URL: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base URL must be http(s), got scheme {:?}",
            base.scheme()
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::Validation(
            "base URL has no host".to_string(),
        ));
    }

    if config.site.allowed_prefixes.is_empty() {
        return Err(ConfigError::Validation(
            "allowed-prefixes must not be empty".to_string(),
        ));
    }

    for prefix in &config.site.allowed_prefixes {
        if prefix.is_empty() {
            return Err(ConfigError::Validation(
                "allowed-prefixes entries must not be empty".to_string(),
            ));
        }
        if !prefix.starts_with("http://") && !prefix.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "allowed prefix {:?} is not an absolute http(s) URL prefix",
                prefix
            )));
        }
    }

    if !config
        .site
        .allowed_prefixes
        .iter()
        .any(|prefix| config.site.base_url.starts_with(prefix.as_str()))
    {
        return Err(ConfigError::Validation(format!(
            "base URL {:?} is not covered by allowed-prefixes",
            config.site.base_url
        )));
    }

    if config.fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    Ok(())
}
