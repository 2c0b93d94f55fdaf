//! `texterify-download`: download the release translations of a project

use anyhow::Context;
use clap::Parser;
use exporter::{
    AggregateResult, ConsoleDiagnostics, Diagnostics, DownloadConfig, ExportError, Locale, ReleaseDownloader,
    Settings, SettingsOverrides,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Download the release translations
#[derive(Debug, Parser)]
#[command(name = "texterify-download", version, after_help = "Example:\n  $ texterify-download --project-path ./app")]
struct Cli {
    /// Folder containing texterify.json; exports are written there
    #[arg(long = "project-path", value_name = "PATH")]
    project_path: Option<PathBuf>,

    /// Replace placeholders with emojis in the export
    #[arg(long)]
    emojify: bool,

    /// Account email, overrides TEXTERIFY_AUTH_EMAIL
    #[arg(long = "auth-email", value_name = "EMAIL")]
    auth_email: Option<String>,

    /// Account secret, overrides TEXTERIFY_AUTH_SECRET
    #[arg(long = "auth-secret", value_name = "SECRET")]
    auth_secret: Option<String>,

    /// Print byte counts and detailed error reports
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            project_path: self.project_path.clone(),
            auth_email: self.auth_email.clone(),
            auth_secret: self.auth_secret.clone(),
        }
    }
}

/// Surface a fatal error through the diagnostics sink before bailing out
fn report(diagnostics: &dyn Diagnostics, error: ExportError) -> ExportError {
    diagnostics.error(&error.to_string());
    diagnostics.suggest(&error);
    error
}

async fn run(cli: Cli, diagnostics: Arc<dyn Diagnostics>) -> anyhow::Result<AggregateResult> {
    let settings = Settings::load(&cli.overrides()).map_err(|e| report(diagnostics.as_ref(), e))?;

    let downloader = ReleaseDownloader::from_settings(&settings, DownloadConfig::default(), Arc::clone(&diagnostics))
        .map_err(|e| report(diagnostics.as_ref(), e))
        .context("failed to set up the export client")?;

    // Precondition failures are already reported by the downloader
    let summary = downloader
        .download_release(&settings, &Locale::release_locales(), cli.emojify)
        .await
        .context("release download aborted")?;

    Ok(summary.result)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let diagnostics: Arc<dyn Diagnostics> = Arc::new(ConsoleDiagnostics::new(cli.verbose));

    match run(cli, diagnostics).await {
        Ok(result) => ExitCode::from(result.exit_code()),
        // Already shown through the diagnostics sink
        Err(e) => {
            tracing::debug!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "texterify-download",
            "--project-path",
            "./app",
            "--emojify",
            "--auth-email",
            "dev@example.com",
            "--auth-secret",
            "s3cret",
        ])
        .unwrap();

        assert!(cli.emojify);
        let overrides = cli.overrides();
        assert_eq!(overrides.project_path, Some(PathBuf::from("./app")));
        assert_eq!(overrides.auth_email.as_deref(), Some("dev@example.com"));
        assert_eq!(overrides.auth_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["texterify-download"]).unwrap();
        assert!(!cli.emojify);
        assert!(cli.project_path.is_none());
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["texterify-download", "extra"]).is_err());
    }

    /// Records error lines shown to the user
    #[derive(Default)]
    struct ErrorLines(std::sync::Mutex<Vec<String>>);

    impl Diagnostics for ErrorLines {
        fn error(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn missing_project_id_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["texterify-download", "--project-path", dir.path().to_str().unwrap()]).unwrap();
        let errors = Arc::new(ErrorLines::default());

        let result = run(cli, errors.clone()).await;

        assert!(result.is_err());
        assert_eq!(*errors.0.lock().unwrap(), vec![ExportError::MissingProjectId.to_string()]);
    }
}
