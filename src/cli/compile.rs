//! Compile command: builds the controller model from a configuration file.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{
    issue_messages, load_inputs, print_issues, print_json, CliError, CliResult, IssueMessage,
};
use crate::compiler::{Compilation, CompileOptions, Compiler, ValidationReport};
use crate::models::{App, AppKind};
use crate::runtime::CallLog;

/// Compile a menu configuration into the controller model
#[derive(Debug, Clone, Args)]
pub struct CompileArgs {
    /// Path to the menu configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Entity registry file (replaces the inline registry block)
    #[arg(short, long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Output the model (or call log with --emit) as JSON
    #[arg(long)]
    pub json: bool,

    /// Output the runtime setter calls instead of the model
    #[arg(long)]
    pub emit: bool,

    /// Reject unknown app types
    #[arg(long)]
    pub strict: bool,
}

/// JSON response for a failed compile.
#[derive(Debug, Clone, Serialize)]
struct FailureResponse {
    compiled: bool,
    issues: Vec<IssueMessage>,
}

impl CompileArgs {
    /// Execute the compile command
    pub fn execute(&self) -> CliResult<()> {
        let (declaration, registry) = load_inputs(&self.config, self.registry.as_ref())?;

        let options = CompileOptions {
            strict_types: self.strict,
        };
        let compilation = match Compiler::new(&registry)
            .with_options(options)
            .compile(&declaration)
        {
            Ok(compilation) => compilation,
            Err(error) => {
                if self.json {
                    print_json(&FailureResponse {
                        compiled: false,
                        issues: issue_messages(&error.report),
                    })?;
                } else {
                    eprintln!("{error}");
                }
                return Err(CliError::validation(format!(
                    "Compilation failed with {} errors",
                    error.errors().len()
                )));
            }
        };

        match (self.emit, self.json) {
            (true, true) => print_json(&CallLog::record(&compilation.controller).calls())?,
            (true, false) => print!("{}", CallLog::record(&compilation.controller)),
            (false, true) => print_json(&compilation)?,
            (false, false) => print_summary(&compilation),
        }

        Ok(())
    }
}

fn print_summary(compilation: &Compilation) {
    let controller = &compilation.controller;
    let settings = &controller.settings;

    println!(
        "✓ Compiled '{}' with {} apps",
        settings.id,
        controller.app_count()
    );
    println!(
        "  Display: {}  Radius: {}  Buttons: {}/{}  Idle: {}  Language: {}",
        settings.peripherals.display,
        settings.radius,
        settings.button_size,
        settings.button_size_focused,
        settings.idle_timeout,
        settings.language
    );

    for app in controller.apps() {
        println!("  {}", app_line(app));
    }

    print_issues(&ValidationReport {
        errors: Vec::new(),
        warnings: compilation.warnings.clone(),
    });
}

fn app_line(app: &App) -> String {
    let detail = match &app.kind {
        AppKind::Generic => String::new(),
        AppKind::Switch(payload) | AppKind::Cover(payload) => {
            let names: Vec<_> = payload.bindings.iter().map(|b| b.entity.id()).collect();
            format!(" → {}", names.join(", "))
        }
        AppKind::Climate(payload) => format!(
            " → {} (step {})",
            payload.climate.id(),
            payload.temperature_step
        ),
        AppKind::MediaPlayer(payload) => format!(
            " → {} (step {})",
            payload.media_player.id(),
            payload.volume_step
        ),
    };

    format!(
        "[{}] {} ({}, {}, {}) at ({}, {}){}",
        app.index,
        app.name,
        app.app_type(),
        app.icon,
        app.color,
        app.position.x,
        app.position.y,
        detail
    )
}
