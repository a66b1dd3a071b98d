use serde::Deserialize;

const DEFAULT_ITERABLE_BASE_URL: &str = "https://api.iterable.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base URL of the Iterable API. Overridable so tests can point
    /// the fetcher at a mock server.
    pub iterable_base_url: String,
    /// Per-project fetch timeout in seconds. Bounds how long one slow
    /// remote list can hold up a consolidation.
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            iterable_base_url: std::env::var("ITERABLE_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ITERABLE_BASE_URL.to_string()),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("FETCH_TIMEOUT_SECS must be a valid number"))?,
        };

        if !config.iterable_base_url.starts_with("http://")
            && !config.iterable_base_url.starts_with("https://")
        {
            anyhow::bail!("ITERABLE_BASE_URL must start with http:// or https://");
        }
        url::Url::parse(&config.iterable_base_url)
            .map_err(|e| anyhow::anyhow!("ITERABLE_BASE_URL is not a valid URL: {}", e))?;
        if config.fetch_timeout_secs == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECS must be greater than zero");
        }

        tracing::debug!("Iterable base URL: {}", config.iterable_base_url);
        tracing::debug!("Fetch timeout: {}s", config.fetch_timeout_secs);
        tracing::debug!("Server port: {}", config.port);

        Ok(config)
    }
}
