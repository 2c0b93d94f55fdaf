//! Core types used throughout the release download system
//!
//! This module contains the task model that the builder produces and the
//! runner consumes, together with the outcome types the run is folded into.

pub mod error;
pub mod files;

pub use error::{ExportError, Result, ErrorSeverity, FileOperation};

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Locales downloaded by a release run, in display order
pub const RELEASE_LOCALES: &[&str] = &["es-ES", "en-US", "fr-FR", "it-IT", "nl-NL", "pt-PT", "es-MX"];

/// File extension of a release export
pub const EXPORT_EXTENSION: &str = "json";

/// Identifier of a target language/region translation set (e.g. `en-US`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fixed list of release locales
    pub fn release_locales() -> Vec<Locale> {
        RELEASE_LOCALES.iter().map(|tag| Locale::new(*tag)).collect()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::new(tag)
    }
}

/// Request parameters shared by every task of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportParams {
    pub project_id: String,
    pub export_config_id: String,
    pub emojify: bool,
}

impl ExportParams {
    pub fn new<P: Into<String>, E: Into<String>>(project_id: P, export_config_id: E) -> Self {
        Self {
            project_id: project_id.into(),
            export_config_id: export_config_id.into(),
            emojify: false,
        }
    }

    pub fn with_emojify(mut self, emojify: bool) -> Self {
        self.emojify = emojify;
        self
    }

    /// Both ids must be non-empty before any task is built
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(ExportError::MissingProjectId);
        }
        if self.export_config_id.trim().is_empty() {
            return Err(ExportError::MissingExportConfigId);
        }
        Ok(())
    }
}

/// One unit of work: download the release export of a single locale
#[derive(Debug, Clone)]
pub struct DownloadTask {
    locale: Locale,
    title: String,
    params: Arc<ExportParams>,
}

impl DownloadTask {
    pub fn new(locale: Locale, params: Arc<ExportParams>) -> Self {
        let title = format!("Downloading {} translations...", locale);
        Self { locale, title, params }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn params(&self) -> &ExportParams {
        &self.params
    }

    /// Destination file name, `<locale>.json`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.locale, EXPORT_EXTENSION)
    }
}

/// Build one task per locale, preserving input order
///
/// Callers validate the parameters first; building itself never fails.
pub fn build_tasks(locales: &[Locale], params: ExportParams) -> Vec<DownloadTask> {
    let params = Arc::new(params);
    locales
        .iter()
        .map(|locale| DownloadTask::new(locale.clone(), Arc::clone(&params)))
        .collect()
}

/// Terminal state of a single task
#[derive(Debug)]
pub enum TaskOutcome {
    /// Export written to disk
    Written { path: PathBuf, bytes: u64 },
    /// Task failed; siblings are unaffected
    Failed(ExportError),
}

impl TaskOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, TaskOutcome::Written { .. })
    }

    pub fn error(&self) -> Option<&ExportError> {
        match self {
            TaskOutcome::Failed(error) => Some(error),
            TaskOutcome::Written { .. } => None,
        }
    }
}

/// Outcome of one task, tagged with its locale
#[derive(Debug)]
pub struct TaskReport {
    pub locale: Locale,
    pub outcome: TaskOutcome,
}

/// Pass/fail verdict for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateResult {
    AllSucceeded,
    AtLeastOneFailed,
}

impl AggregateResult {
    /// Fold task outcomes into a verdict; a single failure fails the run
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a TaskOutcome>,
    {
        if outcomes.into_iter().all(TaskOutcome::is_written) {
            AggregateResult::AllSucceeded
        } else {
            AggregateResult::AtLeastOneFailed
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AggregateResult::AllSucceeded)
    }

    /// Process exit code for this verdict
    pub fn exit_code(&self) -> u8 {
        match self {
            AggregateResult::AllSucceeded => 0,
            AggregateResult::AtLeastOneFailed => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ExportParams {
        ExportParams::new("project-1", "config-1")
    }

    #[test]
    fn builds_one_task_per_locale_in_order() {
        let locales = Locale::release_locales();
        let tasks = build_tasks(&locales, params());

        assert_eq!(tasks.len(), RELEASE_LOCALES.len());
        let built: Vec<&str> = tasks.iter().map(|t| t.locale().as_str()).collect();
        assert_eq!(built, RELEASE_LOCALES);
    }

    #[test]
    fn task_title_and_file_name_follow_locale() {
        let tasks = build_tasks(&[Locale::new("es-MX")], params().with_emojify(true));
        let task = &tasks[0];

        assert_eq!(task.title(), "Downloading es-MX translations...");
        assert_eq!(task.file_name(), "es-MX.json");
        assert!(task.params().emojify);
    }

    #[test]
    fn tasks_share_the_same_params() {
        let tasks = build_tasks(&[Locale::new("es-ES"), Locale::new("en-US")], params());
        assert!(std::ptr::eq(tasks[0].params(), tasks[1].params()));
    }

    #[test]
    fn validate_rejects_missing_ids() {
        assert!(matches!(
            ExportParams::new("  ", "config").validate(),
            Err(ExportError::MissingProjectId)
        ));
        assert!(matches!(
            ExportParams::new("project", "").validate(),
            Err(ExportError::MissingExportConfigId)
        ));
        assert!(params().validate().is_ok());
    }

    #[test]
    fn aggregate_fails_on_any_failure() {
        let outcomes = vec![
            TaskOutcome::Written { path: PathBuf::from("es-ES.json"), bytes: 3 },
            TaskOutcome::Failed(ExportError::MissingProjectId),
        ];
        let result = AggregateResult::from_outcomes(&outcomes);
        assert_eq!(result, AggregateResult::AtLeastOneFailed);
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn aggregate_succeeds_when_everything_was_written() {
        let outcomes = vec![
            TaskOutcome::Written { path: PathBuf::from("es-ES.json"), bytes: 3 },
            TaskOutcome::Written { path: PathBuf::from("en-US.json"), bytes: 5 },
        ];
        let result = AggregateResult::from_outcomes(&outcomes);
        assert!(result.is_success());
        assert_eq!(result.exit_code(), 0);
    }
}
