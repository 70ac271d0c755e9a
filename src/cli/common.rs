//! Shared CLI error types, exit codes and JSON response shapes.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::compiler::{Diagnostic, DiagnosticKind, InMemoryRegistry, ValidationReport, Warning};
use crate::config;
use crate::models::MenuDeclaration;

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Validation or compilation failed
    ValidationError = 1,
    /// File could not be read, parsed or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Input was read but is invalid
    Validation,
    /// Input could not be read or parsed
    Io,
}

/// A failed command, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category
    pub kind: CliErrorKind,
    /// User-facing message
    pub message: String,
}

impl CliError {
    /// Creates a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O or parse failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// One reported issue in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct IssueMessage {
    /// "error" or "warning"
    pub severity: &'static str,
    /// Diagnostic category, errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiagnosticKind>,
    /// App declaration index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<usize>,
    /// Field path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Message text
    pub message: String,
    /// Suggested fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&Diagnostic> for IssueMessage {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: "error",
            kind: Some(diagnostic.kind),
            app: diagnostic.declaration,
            field: Some(diagnostic.field.clone()),
            message: diagnostic.message.clone(),
            suggestion: diagnostic.suggestion.clone(),
        }
    }
}

impl From<&Warning> for IssueMessage {
    fn from(warning: &Warning) -> Self {
        Self {
            severity: "warning",
            kind: None,
            app: warning.declaration,
            field: None,
            message: warning.message.clone(),
            suggestion: None,
        }
    }
}

/// Collects a report's errors and warnings as JSON messages.
#[must_use]
pub fn issue_messages(report: &ValidationReport) -> Vec<IssueMessage> {
    report
        .errors
        .iter()
        .map(IssueMessage::from)
        .chain(report.warnings.iter().map(IssueMessage::from))
        .collect()
}

/// Loads the declaration and registry for a command.
///
/// # Errors
///
/// Returns an I/O error if either file is missing or malformed.
pub fn load_inputs(
    config_path: &Path,
    registry_path: Option<&PathBuf>,
) -> CliResult<(MenuDeclaration, InMemoryRegistry)> {
    if !config_path.exists() {
        return Err(CliError::io(format!(
            "Config file not found: {}",
            config_path.display()
        )));
    }

    config::load_with_registry(config_path, registry_path.map(PathBuf::as_path))
        .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Prints a JSON value to stdout.
///
/// # Errors
///
/// Returns an I/O error if the value cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Prints a report's issues in human-readable form.
pub fn print_issues(report: &ValidationReport) {
    if report.errors.is_empty() && report.warnings.is_empty() {
        return;
    }

    println!("\nIssues:");
    for error in &report.errors {
        println!("  ✗ {error}");
    }
    for warning in &report.warnings {
        println!("  ⚠ {warning}");
    }
}
