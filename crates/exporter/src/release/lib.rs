//! Main entry point for release downloads
//!
//! The call chain flows as follows:
//!
//! User Code
//! ↓
//! ReleaseDownloader (this file)
//! ↓
//! precondition check + task builder (core/mod.rs)
//! ↓
//! TaskRunner (runner.rs)
//! ↓
//! ExportApi (api.rs) + streaming file writes (core/files.rs)

use std::sync::Arc;
use tracing::debug;

use crate::release::{
    api::{ExportApi, TexterifyApi},
    config::DownloadConfig,
    core::{build_tasks, Locale, Result},
    diagnostics::Diagnostics,
    runner::{RunSummary, TaskRunner},
    settings::Settings,
};

/// Downloads the release exports of a set of locales into the project directory
pub struct ReleaseDownloader {
    runner: TaskRunner,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ReleaseDownloader {
    /// Create a downloader on top of an arbitrary export API
    pub fn new(api: Arc<dyn ExportApi>, config: DownloadConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        let runner = TaskRunner::new(api, Arc::clone(&diagnostics), config);
        Self { runner, diagnostics }
    }

    /// Create a downloader talking to the Texterify API with the resolved settings
    pub fn from_settings(
        settings: &Settings,
        mut config: DownloadConfig,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self> {
        if let Some(ref api_base_url) = settings.api_base_url {
            config.api_base_url = api_base_url.clone();
        }
        let api = TexterifyApi::new(&config, settings.credentials.clone())?;
        Ok(Self::new(Arc::new(api), config, diagnostics))
    }

    /// Validate preconditions, then download every locale
    ///
    /// Only precondition failures are returned as `Err`; task failures are
    /// part of the returned summary.
    pub async fn download_release(
        &self,
        settings: &Settings,
        locales: &[Locale],
        emojify: bool,
    ) -> Result<RunSummary> {
        let params = settings.export_params(emojify);
        if let Err(e) = params.validate() {
            debug!("Precondition failed [{}]: {}", e.category(), e);
            self.diagnostics.error(&e.to_string());
            self.diagnostics.suggest(&e);
            return Err(e);
        }

        let tasks = build_tasks(locales, params);
        debug!("Built {} download tasks", tasks.len());
        self.diagnostics
            .info(&format!("Downloading release translations into {}", settings.project_path.display()));

        Ok(self.runner.run(tasks, &settings.project_path).await)
    }
}
