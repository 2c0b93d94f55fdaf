//! Configuration types for the release downloader

use std::time::Duration;

/// Default Texterify API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://app.texterify.com/api/v1";

/// Environment variable overriding the API endpoint
pub const API_BASE_URL_ENV: &str = "TEXTERIFY_API_BASE_URL";

/// Runtime knobs for the export client and task runner
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub api_base_url: String,
    /// Request timeout enforced by the HTTP client
    pub timeout: Duration,
    pub user_agent: String,
    /// Upper bound on tasks in flight at once
    pub max_concurrent_downloads: usize,
}

impl DownloadConfig {
    /// Create a new builder for DownloadConfig
    pub fn builder() -> DownloadConfigBuilder {
        DownloadConfigBuilder::new()
    }

    /// Number of tasks to run at once for a run of `task_count` tasks
    pub fn concurrency_for(&self, task_count: usize) -> usize {
        task_count.min(self.max_concurrent_downloads).max(1)
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("texterify-download/{}", env!("CARGO_PKG_VERSION")),
            max_concurrent_downloads: 8,
        }
    }
}

/// Builder for DownloadConfig
#[derive(Debug, Clone, Default)]
pub struct DownloadConfigBuilder {
    config: DownloadConfig,
}

impl DownloadConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_base_url<S: Into<String>>(mut self, api_base_url: S) -> Self {
        self.config.api_base_url = api_base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_concurrent_downloads(mut self, max: usize) -> Self {
        self.config.max_concurrent_downloads = max;
        self
    }

    pub fn build(self) -> DownloadConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = DownloadConfig::builder()
            .api_base_url("http://localhost:3000/api/v1")
            .timeout(Duration::from_secs(5))
            .max_concurrent_downloads(2)
            .build();

        assert_eq!(config.api_base_url, "http://localhost:3000/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_concurrent_downloads, 2);
        assert!(config.user_agent.starts_with("texterify-download/"));
    }

    #[test]
    fn concurrency_is_bounded() {
        let config = DownloadConfig::builder().max_concurrent_downloads(3).build();
        assert_eq!(config.concurrency_for(7), 3);
        assert_eq!(config.concurrency_for(2), 2);
        assert_eq!(config.concurrency_for(0), 1);

        let zero_limit = DownloadConfig::builder().max_concurrent_downloads(0).build();
        assert_eq!(zero_limit.concurrency_for(4), 1);
    }
}
