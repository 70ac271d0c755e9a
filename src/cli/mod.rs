//! CLI command handlers.
//!
//! Each subcommand loads its inputs, runs the compiler and maps the outcome
//! onto the exit codes in [`common::ExitCode`].

pub mod common;
pub mod compile;
pub mod icons;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use compile::CompileArgs;
pub use icons::IconsArgs;
pub use validate::ValidateArgs;
