//! Exporter Library
//!
//! This library downloads the release translation exports of a Texterify
//! project, one file per locale, into the project directory. Every locale is
//! an independent task: failures are reported as they happen, never cancel
//! other locales, and fold into a single pass/fail verdict at the end.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use exporter::{
//!     ConsoleDiagnostics, DownloadConfig, Locale, ReleaseDownloader,
//!     Settings, SettingsOverrides,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> exporter::Result<()> {
//! // Resolve texterify.json, CLI overrides and credentials
//! let settings = Settings::load(&SettingsOverrides::default())?;
//!
//! let downloader = ReleaseDownloader::from_settings(
//!     &settings,
//!     DownloadConfig::default(),
//!     Arc::new(ConsoleDiagnostics::default()),
//! )?;
//!
//! let summary = downloader
//!     .download_release(&settings, &Locale::release_locales(), false)
//!     .await?;
//!
//! std::process::exit(summary.result.exit_code() as i32);
//! # }
//! ```
//!
//! # Features
//!
//! - **Concurrent downloads**: locales are fetched in parallel, bounded by configuration
//! - **Failure isolation**: one failing locale never stops the others
//! - **Structured service errors**: error lists returned by the API are surfaced per locale
//! - **Remediation hints**: errors carry suggestions for fixing credentials, ids or paths
//! - **Atomic writes**: exports are streamed to a `.part` file and renamed into place

pub mod release;

// Re-export commonly used types for convenience
pub use release::{
    AggregateResult, ConsoleDiagnostics, Credentials, Diagnostics, DownloadConfig, DownloadTask,
    ExportApi, ExportError, ExportParams, Locale, ReleaseDownloader, Result, RunSummary, Settings,
    SettingsOverrides, TaskOutcome, TexterifyApi, RELEASE_LOCALES,
};
