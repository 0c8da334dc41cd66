use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads, normalizes, and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pubsweep::config::load_config;
///
/// let config = load_config(Path::new("pubsweep.toml")).unwrap();
/// println!("Request delay: {}ms", config.fetch.request_delay_ms);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;
    config.normalize();

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::PUBMED_BASE_URL;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn load_full_config() {
        let file = create_temp_config(
            r#"
[site]
base-url = "http://127.0.0.1:9000/"
allowed-prefixes = ["http://127.0.0.1:9000"]

[fetch]
request-delay-ms = 25
user-agent = "TestAgent/1.0"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.site.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.fetch.request_delay_ms, 25);
        assert_eq!(config.fetch.user_agent, "TestAgent/1.0");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = create_temp_config("");

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.site.base_url, PUBMED_BASE_URL);
        assert_eq!(config.site.allowed_prefixes, vec![PUBMED_BASE_URL]);
        assert_eq!(config.fetch.request_delay_ms, 1000);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let file = create_temp_config(
            r#"
[fetch]
request-delay-ms = 2000
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.fetch.request_delay_ms, 2000);
        assert_eq!(config.site.base_url, PUBMED_BASE_URL);
        assert!(config.fetch.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let file = create_temp_config("[site\nbase-url = ");

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_base_url_is_a_validation_error() {
        let file = create_temp_config(
            r#"
[site]
base-url = "no scheme here"
"#,
        );

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/pubsweep.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
