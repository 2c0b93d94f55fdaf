//! Task runner: executes download tasks with per-task failure isolation

use futures::stream::{self, StreamExt};
use reqwest::{Response, StatusCode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::release::{
    api::{ExportApi, ExportOptions, ServiceErrorBody},
    config::DownloadConfig,
    core::{AggregateResult, DownloadTask, ExportError, Locale, Result, TaskOutcome, TaskReport, files},
    diagnostics::Diagnostics,
};

pub const SUCCESS_MESSAGE: &str = "Successfully downloaded and extracted translations.";
pub const FAILURE_MESSAGE: &str = "Failed to download and extract translations.";
pub const GENERIC_TASK_FAILURE: &str = "Failed to download translations.";

/// Counters collected while a run is in flight
#[derive(Debug, Default)]
pub struct RunMetrics {
    pub tasks_started: AtomicU64,
    pub tasks_written: AtomicU64,
    pub tasks_failed: AtomicU64,
    pub bytes_written: AtomicU64,
}

impl RunMetrics {
    pub fn record_task_started(&self) {
        self.tasks_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_task_written(&self, bytes: u64) {
        self.tasks_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_task_failed(&self) {
        self.tasks_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get metrics snapshot
    pub fn snapshot(&self) -> RunMetricsSnapshot {
        RunMetricsSnapshot {
            tasks_started: self.tasks_started.load(Ordering::Relaxed),
            tasks_written: self.tasks_written.load(Ordering::Relaxed),
            tasks_failed: self.tasks_failed.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

/// Immutable snapshot of run metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMetricsSnapshot {
    pub tasks_started: u64,
    pub tasks_written: u64,
    pub tasks_failed: u64,
    pub bytes_written: u64,
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunSummary {
    pub result: AggregateResult,
    /// One report per task, in input order
    pub reports: Vec<TaskReport>,
    pub metrics: RunMetricsSnapshot,
}

impl RunSummary {
    pub fn failed_locales(&self) -> Vec<&Locale> {
        self.reports
            .iter()
            .filter(|r| !r.outcome.is_written())
            .map(|r| &r.locale)
            .collect()
    }

    pub fn written_paths(&self) -> Vec<&Path> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                TaskOutcome::Written { path, .. } => Some(path.as_path()),
                TaskOutcome::Failed(_) => None,
            })
            .collect()
    }

    pub fn report(&self, locale: &str) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.locale.as_str() == locale)
    }
}

/// Executes a list of independent download tasks and folds their outcomes
pub struct TaskRunner {
    api: Arc<dyn ExportApi>,
    diagnostics: Arc<dyn Diagnostics>,
    config: DownloadConfig,
}

impl TaskRunner {
    pub fn new(api: Arc<dyn ExportApi>, diagnostics: Arc<dyn Diagnostics>, config: DownloadConfig) -> Self {
        Self { api, diagnostics, config }
    }

    /// Run every task to a terminal state and report the aggregate verdict
    ///
    /// Tasks run concurrently; a failing task never cancels its siblings.
    pub async fn run(&self, tasks: Vec<DownloadTask>, project_path: &Path) -> RunSummary {
        let concurrency = self.config.concurrency_for(tasks.len());
        debug!("Starting release download of {} locales with concurrency={}", tasks.len(), concurrency);

        let metrics = RunMetrics::default();
        let api = self.api.as_ref();
        let diagnostics = self.diagnostics.as_ref();
        let metrics_ref = &metrics;

        let reports: Vec<TaskReport> = stream::iter(tasks)
            .map(|task| {
                diagnostics.task_started(task.locale(), task.title());
                run_task(api, diagnostics, metrics_ref, project_path, task)
            })
            .buffered(concurrency)
            .collect()
            .await;

        let result = AggregateResult::from_outcomes(reports.iter().map(|r| &r.outcome));
        match result {
            AggregateResult::AllSucceeded => diagnostics.success(SUCCESS_MESSAGE),
            AggregateResult::AtLeastOneFailed => diagnostics.error(FAILURE_MESSAGE),
        }

        let metrics = metrics.snapshot();
        info!(
            "Release download finished: {:?} ({} written, {} failed, {} bytes)",
            result, metrics.tasks_written, metrics.tasks_failed, metrics.bytes_written
        );

        RunSummary { result, reports, metrics }
    }
}

/// Drive one task to a terminal state, reporting its failure immediately
pub async fn run_task(
    api: &dyn ExportApi,
    diagnostics: &dyn Diagnostics,
    metrics: &RunMetrics,
    project_path: &Path,
    task: DownloadTask,
) -> TaskReport {
    metrics.record_task_started();

    let outcome = match execute_task(api, diagnostics, project_path, &task).await {
        Ok((path, bytes)) => {
            metrics.record_task_written(bytes);
            diagnostics.task_succeeded(task.locale(), &path, bytes);
            TaskOutcome::Written { path, bytes }
        }
        Err(error) => {
            metrics.record_task_failed();
            debug!("Download of {} failed [{}]: {}", task.locale(), error.category(), error);
            diagnostics.task_failed(task.locale(), &error);
            diagnostics.suggest(&error);
            TaskOutcome::Failed(error)
        }
    };

    TaskReport {
        locale: task.locale().clone(),
        outcome,
    }
}

async fn execute_task(
    api: &dyn ExportApi,
    diagnostics: &dyn Diagnostics,
    project_path: &Path,
    task: &DownloadTask,
) -> Result<(PathBuf, u64)> {
    let params = task.params();
    let options = ExportOptions {
        emojify: params.emojify,
        locale: task.locale().to_string(),
    };

    let response = api
        .export_release(&params.project_id, &params.export_config_id, &options)
        .await?;

    if response.status() != StatusCode::OK {
        return Err(service_error(diagnostics, task.locale(), response).await);
    }

    let url = response.url().to_string();
    let dest_path = files::destination_path(project_path, &task.file_name());
    debug!("Streaming {} export to {}", task.locale(), dest_path.display());

    let bytes = files::write_stream(&url, response.bytes_stream(), &dest_path).await?;
    Ok((dest_path, bytes))
}

/// Turn a non-OK response into a task error, surfacing the service's error list
async fn service_error(diagnostics: &dyn Diagnostics, locale: &Locale, response: Response) -> ExportError {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => ServiceErrorBody::from_slice(&body),
        Err(e) => {
            debug!("Failed to read error body for {}: {}", locale, e);
            None
        }
    };

    match body {
        Some(body) if body.has_application_error() => {
            let details = body.details();
            diagnostics.error_list(locale, &details);
            ExportError::Service {
                locale: locale.to_string(),
                status,
                details,
            }
        }
        _ => {
            diagnostics.error(GENERIC_TASK_FAILURE);
            ExportError::UnexpectedStatus {
                locale: locale.to_string(),
                status,
            }
        }
    }
}
