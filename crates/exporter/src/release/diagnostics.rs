//! Human-readable reporting of task progress, failures and remediation hints

use std::path::Path;

use crate::release::core::{ExportError, Locale};

/// Sink for user-facing messages emitted during a release download
///
/// All methods default to doing nothing so implementors only override what they display.
pub trait Diagnostics: Send + Sync {
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn task_started(&self, _locale: &Locale, _title: &str) {}
    fn task_succeeded(&self, _locale: &Locale, _path: &Path, _bytes: u64) {}
    fn task_failed(&self, _locale: &Locale, _error: &ExportError) {}
    /// Structured error list returned by the service
    fn error_list(&self, _locale: &Locale, _details: &[String]) {}
    /// Remediation hint derived from the error, if one can be inferred
    fn suggest(&self, _error: &ExportError) {}
}

/// Console diagnostics: progress on stdout, failures on stderr
#[derive(Debug, Default)]
pub struct ConsoleDiagnostics {
    pub verbose: bool,
}

impl ConsoleDiagnostics {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Diagnostics for ConsoleDiagnostics {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }

    fn task_started(&self, _locale: &Locale, title: &str) {
        println!("📥 {}", title);
    }

    fn task_succeeded(&self, locale: &Locale, path: &Path, bytes: u64) {
        if self.verbose {
            println!("✅ {}: {} ({} bytes)", locale, path.display(), bytes);
        } else {
            println!("✅ {}: {}", locale, path.display());
        }
    }

    fn task_failed(&self, locale: &Locale, error: &ExportError) {
        eprintln!("❌ Failed to download {} translations: {}", locale, error);
        if self.verbose {
            eprint!("{}", error.detailed_report());
        }
    }

    fn error_list(&self, locale: &Locale, details: &[String]) {
        for detail in details {
            eprintln!("   {} → {}", locale, detail);
        }
    }

    fn suggest(&self, error: &ExportError) {
        if let Some(suggestion) = error.suggestion() {
            eprintln!("💡 {}", suggestion);
        }
    }
}

/// Diagnostics sink that discards everything
#[derive(Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {}
