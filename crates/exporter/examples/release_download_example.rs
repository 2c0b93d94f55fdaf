//! Example demonstrating a release download with custom settings
//!
//! Downloads two locales into a temporary directory and prints the outcome of
//! each task. Point it at a Texterify instance via environment variables:
//!
//! ```
//! TEXTERIFY_API_BASE_URL=http://localhost:3000/api/v1 \
//! TEXTERIFY_PROJECT_ID=... TEXTERIFY_EXPORT_CONFIG_ID=... \
//! TEXTERIFY_AUTH_EMAIL=... TEXTERIFY_AUTH_SECRET=... \
//! cargo run --example release_download_example
//! ```

use exporter::{
    ConsoleDiagnostics, Credentials, DownloadConfig, Locale, ReleaseDownloader, Settings, TaskOutcome,
};
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::main]
async fn main() -> exporter::Result<()> {
    tracing_subscriber::fmt::init();

    let temp_dir = tempdir().expect("failed to create temporary directory");
    println!("📁 Download directory: {}", temp_dir.path().display());

    let settings = Settings {
        project_id: std::env::var("TEXTERIFY_PROJECT_ID").unwrap_or_default(),
        export_config_id: std::env::var("TEXTERIFY_EXPORT_CONFIG_ID").unwrap_or_default(),
        project_path: temp_dir.path().to_path_buf(),
        credentials: Credentials::from_env(),
        api_base_url: std::env::var("TEXTERIFY_API_BASE_URL").ok(),
        ..Default::default()
    };

    let config = DownloadConfig::builder().max_concurrent_downloads(2).build();
    let downloader = ReleaseDownloader::from_settings(&settings, config, Arc::new(ConsoleDiagnostics::new(true)))?;

    let locales = vec![Locale::new("en-US"), Locale::new("es-ES")];
    let summary = downloader.download_release(&settings, &locales, false).await?;

    for report in &summary.reports {
        match &report.outcome {
            TaskOutcome::Written { path, bytes } => {
                println!("✅ {} → {} ({} bytes)", report.locale, path.display(), bytes)
            }
            TaskOutcome::Failed(error) => println!("❌ {} → {}", report.locale, error.category()),
        }
    }

    println!("📊 {:?}: {:?}", summary.result, summary.metrics);
    Ok(())
}
