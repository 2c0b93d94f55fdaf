//! Error types for release downloads with context and remediation hints

use std::error::Error;
use std::path::PathBuf;
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while downloading release exports
#[derive(Error, Debug)]
pub enum ExportError {
    /// No project id configured
    #[error("No project ID has been specified")]
    MissingProjectId,

    /// No export configuration id configured
    #[error("No export configuration ID has been specified")]
    MissingExportConfigId,

    /// Configuration could not be loaded
    #[error("Invalid configuration: {message}")]
    Configuration {
        message: String,
        path: Option<PathBuf>,
        suggestion: Option<String>,
    },

    /// The service answered with an application-level error payload
    #[error("Service rejected export for '{locale}' with status {status}")]
    Service {
        locale: String,
        status: StatusCode,
        details: Vec<String>,
    },

    /// Non-OK status without a usable error payload
    #[error("Failed to download translations for '{locale}' (status {status})")]
    UnexpectedStatus {
        locale: String,
        status: StatusCode,
    },

    /// HTTP transport errors with context
    #[error("HTTP request to '{url}' failed: {source}")]
    HttpRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the client timeout
    #[error("Request to '{url}' timed out (check network or increase the timeout)")]
    NetworkTimeout {
        url: String,
    },

    /// Local file system errors with file context
    #[error("File operation failed on '{path}' while {operation}")]
    FileSystem {
        path: PathBuf,
        operation: FileOperation,
        #[source]
        source: std::io::Error,
    },

    /// Malformed API base URL
    #[error("Invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Types of file operations for error context
#[derive(Debug, Clone, PartialEq)]
pub enum FileOperation {
    Write,
    Create,
    Move,
    CreateDir,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Write => write!(f, "writing"),
            FileOperation::Create => write!(f, "creating"),
            FileOperation::Move => write!(f, "moving"),
            FileOperation::CreateDir => write!(f, "creating directory"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// Build a transport error, classifying timeouts separately
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            ExportError::NetworkTimeout { url }
        } else {
            ExportError::HttpRequest { url, source }
        }
    }

    /// True when the failure happened on the local side (writing the file)
    pub fn is_local_io(&self) -> bool {
        matches!(self, ExportError::FileSystem { .. })
    }

    /// HTTP status attached to the error, if the service answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ExportError::Service { status, .. } | ExportError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ExportError::HttpRequest { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ExportError::MissingProjectId => "missing_project_id",
            ExportError::MissingExportConfigId => "missing_export_config_id",
            ExportError::Configuration { .. } => "configuration",
            ExportError::Service { .. } => "service",
            ExportError::UnexpectedStatus { .. } => "unexpected_status",
            ExportError::HttpRequest { .. } => "http_request",
            ExportError::NetworkTimeout { .. } => "network_timeout",
            ExportError::FileSystem { .. } => "file_system",
            ExportError::InvalidUrl { .. } => "invalid_url",
        }
    }

    /// Get severity level for error prioritization
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExportError::MissingProjectId => ErrorSeverity::Critical,
            ExportError::MissingExportConfigId => ErrorSeverity::Critical,
            ExportError::Configuration { .. } => ErrorSeverity::Critical,
            ExportError::InvalidUrl { .. } => ErrorSeverity::Critical,
            ExportError::Service { .. } => ErrorSeverity::High,
            ExportError::UnexpectedStatus { .. } => ErrorSeverity::High,
            ExportError::FileSystem { .. } => ErrorSeverity::High,
            ExportError::HttpRequest { .. } => ErrorSeverity::Medium,
            ExportError::NetworkTimeout { .. } => ErrorSeverity::Medium,
        }
    }

    /// Get a user-facing hint for resolving the error, when one can be inferred
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ExportError::MissingProjectId => {
                Some("Set \"project_id\" in your texterify.json or pass --project-path to the folder containing it")
            }
            ExportError::MissingExportConfigId => {
                Some("Set \"export_config_id\" in your texterify.json to the export configuration you want to download")
            }
            ExportError::Configuration { suggestion, .. } => suggestion.as_deref(),
            ExportError::NetworkTimeout { .. } => {
                Some("Check your internet connection or try again later")
            }
            ExportError::HttpRequest { source, .. } if source.is_connect() => {
                Some("Check your internet connection and the configured API base URL")
            }
            ExportError::FileSystem { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                Some("Make sure you have write access to the project path")
            }
            ExportError::InvalidUrl { .. } => {
                Some("The API base URL must be absolute, e.g. https://app.texterify.com/api/v1")
            }
            _ => match self.status() {
                Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => Some(
                    "Check your credentials: pass --auth-email and --auth-secret or set TEXTERIFY_AUTH_EMAIL and TEXTERIFY_AUTH_SECRET",
                ),
                Some(StatusCode::NOT_FOUND) => {
                    Some("Check that project_id and export_config_id in texterify.json exist and are accessible")
                }
                _ => None,
            },
        }
    }

    /// Create a detailed error report for debugging
    pub fn detailed_report(&self) -> String {
        let mut report = format!("Error: {}\n", self);
        report.push_str(&format!("Category: {}\n", self.category()));
        report.push_str(&format!("Severity: {:?}\n", self.severity()));

        if let ExportError::Service { details, .. } = self {
            for detail in details {
                report.push_str(&format!("Detail: {}\n", detail));
            }
        }

        if let Some(suggestion) = self.suggestion() {
            report.push_str(&format!("Suggestion: {}\n", suggestion));
        }

        if let Some(source) = self.source() {
            report.push_str(&format!("Root cause: {}\n", source));
        }

        report
    }
}

/// Error severity levels for prioritization
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}
