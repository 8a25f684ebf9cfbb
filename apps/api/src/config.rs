use anyhow::{Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;

const DEFAULT_PORT: u16 = 8080;
/// Images travel base64-encoded inside JSON, so the default body limit is generous.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// The API key is optional at startup: without it the service still assembles
/// prompts, and image analysis answers 500 "API key not configured".
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            anthropic_api_url: ANTHROPIC_API_URL.to_string(),
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            anthropic_api_url: lookup("ANTHROPIC_API_URL").unwrap_or(defaults.anthropic_api_url),
            port: parse_or("PORT", lookup("PORT"), defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_body_bytes: parse_or(
                "MAX_BODY_BYTES",
                lookup("MAX_BODY_BYTES"),
                defaults.max_body_bytes,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let c = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.rust_log, "info");
        assert!(c.anthropic_api_key.is_none());
        assert_eq!(c.anthropic_api_url, ANTHROPIC_API_URL);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let c = Config::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "  ")])).unwrap();
        assert!(c.anthropic_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let c = Config::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("PORT", "3000"),
            ("MAX_BODY_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(c.anthropic_api_key.as_deref(), Some("sk-test"));
        assert_eq!(c.port, 3000);
        assert_eq!(c.max_body_bytes, 1024);
    }

    #[test]
    fn test_invalid_port_is_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
