use std::path::PathBuf;

use anyhow::Result;

/// Walkthrough settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub api_base_url: String,
    /// Where the local store keeps `userId`, `userEmail` and `selectedJobId`.
    pub store_path: PathBuf,
    pub rust_log: String,
}

impl FlowConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url =
            lookup("API_BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("API_BASE_URL must be an http(s) URL, got '{api_base_url}'");
        }

        Ok(FlowConfig {
            api_base_url,
            store_path: lookup("FLOW_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".prep-session.json")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "warn".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FlowConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.store_path, PathBuf::from(".prep-session.json"));
        assert_eq!(config.rust_log, "warn");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = FlowConfig::from_lookup(|key| {
            (key == "API_BASE_URL").then(|| "localhost:8080".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));
    }
}
