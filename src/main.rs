//! Dial Menu Compiler - validates and compiles rotary-dial menu configurations
//!
//! Reads a `dial_menu:` configuration, resolves its entities against a
//! registry and prints the assembled controller model or its setter calls.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dialmenu::cli::{CompileArgs, ExitCode, IconsArgs, ValidateArgs};
use dialmenu::constants::{APP_BINARY_NAME, APP_NAME};

/// Dial Menu Compiler - validates and compiles rotary-dial menu configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a configuration into the controller model
    Compile(CompileArgs),
    /// Validate a configuration and resolve its entities
    Validate(ValidateArgs),
    /// List available icons
    Icons(IconsArgs),
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Command::Compile(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Icons(args) => args.execute(),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.exit_code() == ExitCode::IoError {
                eprintln!("Run '{APP_BINARY_NAME} --help' for usage.");
            }
            e.exit_code()
        }
    };
    std::process::exit(code.code());
}
