//! Project settings and credentials
//!
//! Settings are resolved once at startup from the project's `texterify.json`,
//! command-line overrides and the environment, then passed around read-only.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::release::config::API_BASE_URL_ENV;
use crate::release::core::{ExportError, ExportParams, Result};

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "texterify.json";

pub const AUTH_EMAIL_ENV: &str = "TEXTERIFY_AUTH_EMAIL";
pub const AUTH_SECRET_ENV: &str = "TEXTERIFY_AUTH_SECRET";

/// Account credentials sent with every API request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: Option<String>,
    pub secret: Option<String>,
}

impl Credentials {
    /// Read credentials from the environment, loading `.env` if present
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            email: non_empty(std::env::var(AUTH_EMAIL_ENV).ok()),
            secret: non_empty(std::env::var(AUTH_SECRET_ENV).ok()),
        }
    }

    /// Values passed on the command line win over `fallback`
    pub fn or(self, fallback: Credentials) -> Self {
        Self {
            email: self.email.or(fallback.email),
            secret: self.secret.or(fallback.secret),
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Project folder; also redirects where `texterify.json` is read from
    pub project_path: Option<PathBuf>,
    pub auth_email: Option<String>,
    pub auth_secret: Option<String>,
}

/// On-disk shape of `texterify.json`
#[derive(Debug, Clone, Default, Deserialize)]
struct ProjectConfigFile {
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    export_config_id: Option<String>,
    #[serde(default)]
    project_path: Option<PathBuf>,
    #[serde(default)]
    api_base_url: Option<String>,
}

impl ProjectConfigFile {
    fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ExportError::Configuration {
                    message: format!("Failed to read {}: {}", path.display(), e),
                    path: Some(path.to_path_buf()),
                    suggestion: None,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|e| ExportError::Configuration {
            message: format!("Failed to parse {}: {}", path.display(), e),
            path: Some(path.to_path_buf()),
            suggestion: Some(format!("Make sure {} contains a valid JSON object", CONFIG_FILE_NAME)),
        })
    }
}

/// Resolved settings for one invocation
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub project_id: String,
    pub export_config_id: String,
    /// Directory the exports are written into
    pub project_path: PathBuf,
    pub credentials: Credentials,
    pub api_base_url: Option<String>,
    /// File the project settings were read from
    pub config_file: PathBuf,
}

impl Settings {
    /// Resolve settings relative to the current directory and environment
    pub fn load(overrides: &SettingsOverrides) -> Result<Self> {
        let mut settings = Self::resolve(overrides, Path::new("."), Credentials::from_env())?;
        if let Some(url) = non_empty(std::env::var(API_BASE_URL_ENV).ok()) {
            settings.api_base_url = Some(url);
        }
        Ok(settings)
    }

    /// Resolve settings against an explicit working directory and env credentials
    pub fn resolve(
        overrides: &SettingsOverrides,
        working_dir: &Path,
        env_credentials: Credentials,
    ) -> Result<Self> {
        let config_file = match overrides.project_path {
            Some(ref project_path) => project_path.join(CONFIG_FILE_NAME),
            None => working_dir.join(CONFIG_FILE_NAME),
        };
        let file = ProjectConfigFile::load(&config_file)?;

        let project_path = match (&overrides.project_path, file.project_path) {
            (Some(project_path), _) => project_path.clone(),
            (None, Some(from_file)) => working_dir.join(from_file),
            (None, None) => working_dir.to_path_buf(),
        };

        let cli_credentials = Credentials {
            email: non_empty(overrides.auth_email.clone()),
            secret: non_empty(overrides.auth_secret.clone()),
        };

        let settings = Self {
            project_id: file.project_id.unwrap_or_default(),
            export_config_id: file.export_config_id.unwrap_or_default(),
            project_path,
            credentials: cli_credentials.or(env_credentials),
            api_base_url: non_empty(file.api_base_url),
            config_file,
        };

        debug!(
            "Resolved settings from {}: project_id={:?} export_config_id={:?} project_path={}",
            settings.config_file.display(),
            settings.project_id,
            settings.export_config_id,
            settings.project_path.display()
        );
        Ok(settings)
    }

    /// Shared request parameters for the export tasks
    pub fn export_params(&self, emojify: bool) -> ExportParams {
        ExportParams::new(self.project_id.clone(), self.export_config_id.clone()).with_emojify(emojify)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
