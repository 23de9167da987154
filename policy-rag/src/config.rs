use anyhow::{Context, Result};

pub const DEFAULT_LANGFLOW_URL: &str = "http://127.0.0.1:7860";
pub const DEFAULT_FLOW_ID: &str = "policy-rag-flow";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub langflow_url: String,
    pub flow_id: String,
    pub retriever_timeout_secs: u64,
    pub log_level: String,
    /// Origins allowed to call the tool from a browser. Empty means any.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid PORT: {raw}"))?,
            None => 8080,
        };
        let retriever_timeout_secs = match lookup("RETRIEVER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid RETRIEVER_TIMEOUT_SECS: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            port,
            langflow_url: lookup("LANGFLOW_URL")
                .unwrap_or_else(|| DEFAULT_LANGFLOW_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            flow_id: lookup("LANGFLOW_FLOW_ID").unwrap_or_else(|| DEFAULT_FLOW_ID.to_string()),
            retriever_timeout_secs,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.langflow_url, "http://127.0.0.1:7860");
        assert_eq!(config.flow_id, "policy-rag-flow");
        assert_eq!(config.retriever_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn overrides_and_trims_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("LANGFLOW_URL", "http://langflow:7860/"),
            ("LANGFLOW_FLOW_ID", "abc-123"),
            ("RETRIEVER_TIMEOUT_SECS", "5"),
            ("CORS_ALLOWED_ORIGINS", "https://orchestrate.acme.corp, ,http://localhost:3000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.langflow_url, "http://langflow:7860");
        assert_eq!(config.flow_id, "abc-123");
        assert_eq!(config.retriever_timeout_secs, 5);
        assert_eq!(
            config.cors_allowed_origins,
            ["https://orchestrate.acme.corp", "http://localhost:3000"]
        );
    }

    #[test]
    fn bad_numbers_fail_at_startup() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("RETRIEVER_TIMEOUT_SECS", "-1")])).is_err());
    }
}
