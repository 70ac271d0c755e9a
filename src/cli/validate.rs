//! Validation command for menu configuration files.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{
    issue_messages, load_inputs, print_issues, print_json, CliError, CliResult, IssueMessage,
};
use crate::compiler::{CompileOptions, Compiler, ValidationReport};

/// Validate a menu configuration without building it
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to the menu configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Entity registry file (replaces the inline registry block)
    #[arg(short, long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Reject unknown app types and treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// JSON response for `validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// True when no errors were found
    pub valid: bool,
    /// Number of app declarations
    pub apps: usize,
    /// Errors followed by warnings
    pub issues: Vec<IssueMessage>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let (declaration, registry) = load_inputs(&self.config, self.registry.as_ref())?;

        let options = CompileOptions {
            strict_types: self.strict,
        };
        let report = match Compiler::new(&registry)
            .with_options(options)
            .check(&declaration)
        {
            Ok((_, warnings)) => ValidationReport {
                errors: Vec::new(),
                warnings,
            },
            Err(error) => error.report,
        };

        let response = ValidationResponse {
            valid: report.is_valid(),
            apps: declaration.apps.len(),
            issues: issue_messages(&report),
        };

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Validation passed ({} apps)", response.apps);
            } else {
                println!("✗ Validation failed");
            }
            print_issues(&report);
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }
        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
