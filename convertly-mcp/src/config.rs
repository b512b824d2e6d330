//! Server configuration from the environment

use std::env;
use std::time::Duration;
use convertly_docs::{GeminiConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};

pub const DEFAULT_LOG_FILTER: &str = "convertly=info";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Enables document processing when set
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    /// Simulated latency of the mock rate provider
    pub rate_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_endpoint: DEFAULT_ENDPOINT.to_string(),
            rate_delay: Duration::ZERO,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = ServerConfig::default();

        ServerConfig {
            gemini_api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            gemini_model: get("CONVERTLY_GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_endpoint: get("CONVERTLY_GEMINI_ENDPOINT").unwrap_or(defaults.gemini_endpoint),
            rate_delay: get("CONVERTLY_RATE_DELAY_MS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.rate_delay),
        }
    }

    pub fn gemini(&self) -> Option<GeminiConfig> {
        self.gemini_api_key.as_ref().map(|key| {
            GeminiConfig::new(key.clone())
                .with_model(self.gemini_model.clone())
                .with_endpoint(self.gemini_endpoint.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg, ServerConfig::default());
        assert!(cfg.gemini().is_none());
    }

    #[test]
    fn test_api_key_fallback() {
        assert_eq!(config(&[("API_KEY", "b")]).gemini_api_key.as_deref(), Some("b"));
        assert_eq!(
            config(&[("GEMINI_API_KEY", "a"), ("API_KEY", "b")]).gemini_api_key.as_deref(),
            Some("a")
        );
        assert_eq!(config(&[("GEMINI_API_KEY", "  ")]).gemini_api_key, None);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("GEMINI_API_KEY", "k"),
            ("CONVERTLY_GEMINI_MODEL", "gemini-test"),
            ("CONVERTLY_GEMINI_ENDPOINT", "http://localhost:1"),
            ("CONVERTLY_RATE_DELAY_MS", "250"),
        ]);
        assert_eq!(cfg.rate_delay, Duration::from_millis(250));

        let gemini = cfg.gemini().unwrap();
        assert_eq!(gemini.model, "gemini-test");
        assert_eq!(gemini.endpoint, "http://localhost:1");
    }

    #[test]
    fn test_bad_delay_is_ignored() {
        assert_eq!(config(&[("CONVERTLY_RATE_DELAY_MS", "soon")]).rate_delay, Duration::ZERO);
    }
}
