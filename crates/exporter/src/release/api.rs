//! Texterify export API client
//!
//! This module handles talking to the translation service:
//! - Building the release export endpoint for a project/export configuration
//! - Attaching the account credentials to each request
//! - Decoding the structured error payload of rejected exports

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::release::config::DownloadConfig;
use crate::release::core::{ExportError, Result};
use crate::release::settings::Credentials;

/// Per-request options of a release export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub emojify: bool,
    pub locale: String,
}

/// Remote export service
///
/// Implementations return the raw response; status handling and streaming
/// belong to the task runner.
#[async_trait]
pub trait ExportApi: Send + Sync {
    async fn export_release(
        &self,
        project_id: &str,
        export_config_id: &str,
        options: &ExportOptions,
    ) -> Result<Response>;
}

/// reqwest-backed client for the Texterify API
pub struct TexterifyApi {
    base_url: Url,
    credentials: Credentials,
    client: Client,
}

impl std::fmt::Debug for TexterifyApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TexterifyApi")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.credentials.email)
            .finish()
    }
}

impl TexterifyApi {
    /// Create a client from the download configuration and resolved credentials
    pub fn new(config: &DownloadConfig, credentials: Credentials) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| ExportError::InvalidUrl {
            url: config.api_base_url.clone(),
            source: e,
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ExportError::Configuration {
                message: format!("API base URL '{}' cannot carry a path", base_url),
                path: None,
                suggestion: Some("Use an http(s) URL such as https://app.texterify.com/api/v1".to_string()),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ExportError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
                path: None,
                suggestion: None,
            })?;

        Ok(Self { base_url, credentials, client })
    }

    /// Release export endpoint for one locale
    pub fn release_url(&self, project_id: &str, export_config_id: &str, options: &ExportOptions) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ExportError::Configuration {
                message: format!("API base URL '{}' cannot carry a path", self.base_url),
                path: None,
                suggestion: None,
            })?
            .pop_if_empty()
            .extend(["projects", project_id, "export_configs", export_config_id, "release"]);

        url.query_pairs_mut()
            .append_pair("locale", &options.locale)
            .append_pair("emojify", if options.emojify { "true" } else { "false" });

        Ok(url)
    }
}

#[async_trait]
impl ExportApi for TexterifyApi {
    async fn export_release(
        &self,
        project_id: &str,
        export_config_id: &str,
        options: &ExportOptions,
    ) -> Result<Response> {
        let url = self.release_url(project_id, export_config_id, options)?;
        debug!("Requesting release export: {}", url);

        let mut request = self.client
            .get(url.clone())
            .header("Accept", "application/json");
        if let Some(ref email) = self.credentials.email {
            request = request.header("Auth-Email", email);
        }
        if let Some(ref secret) = self.credentials.secret {
            request = request.header("Auth-Secret", secret);
        }

        request
            .send()
            .await
            .map_err(|e| ExportError::from_reqwest(url.as_str(), e))
    }
}

/// JSON body of a rejected export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Value,
    #[serde(default)]
    pub errors: Value,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceErrorBody {
    /// Parse a response body; `None` when it is not a JSON object
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Whether the payload carries application-level error information
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) mean there is none.
    pub fn has_application_error(&self) -> bool {
        match &self.error {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            _ => true,
        }
    }

    /// Flatten the payload into display lines
    pub fn details(&self) -> Vec<String> {
        let mut details = Vec::new();

        match &self.errors {
            Value::Array(entries) => {
                details.extend(entries.iter().map(describe_entry));
            }
            Value::Object(fields) => {
                for (field, messages) in fields {
                    match messages {
                        Value::Array(messages) => details.extend(
                            messages.iter().map(|m| format!("{} {}", field, describe_entry(m))),
                        ),
                        other => details.push(format!("{} {}", field, describe_entry(other))),
                    }
                }
            }
            _ => {}
        }

        if details.is_empty() {
            if let Some(ref message) = self.message {
                details.push(message.clone());
            } else if let Value::String(_) | Value::Object(_) = self.error {
                details.push(describe_entry(&self.error));
            }
        }

        details
    }
}

fn describe_entry(entry: &Value) -> String {
    match entry {
        Value::String(text) => text.clone(),
        Value::Object(object) => ["details", "message", "code"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| entry.to_string()),
        other => other.to_string(),
    }
}
