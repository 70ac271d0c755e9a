//! Compile diagnostics and the error returned when compilation fails.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use serde::Serialize;
use std::fmt;

/// Stage that rejected the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Missing required key, value out of range, unknown icon or language
    Schema,
    /// Referenced entity id not found in the registry
    Resolution,
    /// Layout produced an inconsistent position set
    Geometry,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "Schema Error"),
            Self::Resolution => write!(f, "Resolution Error"),
            Self::Geometry => write!(f, "Geometry Error"),
        }
    }
}

/// A single error with the declaration and field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stage that produced the error
    pub kind: DiagnosticKind,
    /// Index of the offending app declaration, `None` for controller keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<usize>,
    /// Field path, e.g. `apps[2].switches[0].switch_id`
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic for a controller-level field.
    pub fn new(kind: DiagnosticKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            declaration: None,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Creates a schema diagnostic.
    pub fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Schema, field, message)
    }

    /// Creates a resolution diagnostic.
    pub fn resolution(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Resolution, field, message)
    }

    /// Sets the app declaration context.
    #[must_use]
    pub const fn with_declaration(mut self, index: usize) -> Self {
        self.declaration = Some(index);
        self
    }

    /// Sets a suggestion for fixing the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.declaration {
            write!(f, "[App {}] {} at {}: {}", index, self.kind, self.field, self.message)?;
        } else {
            write!(f, "{} at {}: {}", self.kind, self.field, self.message)?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Non-fatal observation about a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Index of the app declaration, `None` for controller keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<usize>,
    /// Warning message
    pub message: String,
}

impl Warning {
    /// Creates a warning attached to an app declaration.
    pub fn for_app(index: usize, message: impl Into<String>) -> Self {
        Self {
            declaration: Some(index),
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.declaration {
            Some(index) => write!(f, "[App {}] {}", index, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Errors and warnings collected across the validation and resolution stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Errors that abort compilation
    pub errors: Vec<Diagnostic>,
    /// Non-blocking warnings
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: Diagnostic) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Moves everything from `other` into this report.
    pub fn absorb(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Formats the report as a user-friendly error message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} compile errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Compilation failed; no model was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Every error found, plus any warnings gathered before the failure
    pub report: ValidationReport,
}

impl CompileError {
    /// Wraps a single diagnostic.
    #[must_use]
    pub fn single(diagnostic: Diagnostic) -> Self {
        let mut report = ValidationReport::new();
        report.add_error(diagnostic);
        Self { report }
    }

    /// All errors.
    #[must_use]
    pub fn errors(&self) -> &[Diagnostic] {
        &self.report.errors
    }

    /// Returns true if any error has the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: DiagnosticKind) -> bool {
        self.report.errors.iter().any(|e| e.kind == kind)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report.format_message().trim_end())
    }
}

impl std::error::Error for CompileError {}
