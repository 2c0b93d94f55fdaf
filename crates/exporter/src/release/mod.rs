//! Release download module
//!
//! This module contains the release download functionality including
//! core task types, configuration, the export API client and the task runner.

pub mod core;
pub mod config;
pub mod settings;
pub mod api;
pub mod diagnostics;
pub mod runner;
pub mod r#lib;

// Re-export main types for convenience
pub use r#lib::ReleaseDownloader;
pub use self::core::{
    build_tasks, AggregateResult, DownloadTask, ExportParams, Locale, TaskOutcome, TaskReport,
    ExportError, Result, ErrorSeverity, FileOperation, RELEASE_LOCALES,
};
pub use config::{DownloadConfig, DownloadConfigBuilder};
pub use settings::{Credentials, Settings, SettingsOverrides};
pub use api::{ExportApi, ExportOptions, ServiceErrorBody, TexterifyApi};
pub use diagnostics::{ConsoleDiagnostics, Diagnostics, NullDiagnostics};
pub use runner::{RunMetrics, RunMetricsSnapshot, RunSummary, TaskRunner};
