//! tack CLI: the command-line interface for the tack CSS compiler.
//!
//! Provides `tack build` to expand a stylesheet's `@tailwind` directives
//! against the configured content, and `tack scan` to list the candidates
//! found in that content.

#![warn(missing_docs)]

mod build;
mod project;
mod scan;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "TACK_LOG";

/// tack: a utility-first CSS compiler.
#[derive(Parser, Debug)]
#[command(name = "tack", version, about = "Utility-first CSS compiler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `tack.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a stylesheet.
    Build(BuildArgs),
    /// List the candidates found in the configured content.
    Scan(ScanArgs),
}

/// Arguments for the `tack build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Input stylesheet; reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file; writes stdout when omitted.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Emit the expanded syntax tree as JSON instead of CSS.
    #[arg(long)]
    pub ast: bool,

    /// Print CSS without optional whitespace.
    #[arg(long)]
    pub minify: bool,
}

/// Arguments for the `tack scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Output format for the candidate list.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file.
    pub config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Build(ref args) => build::run(args, &global).await,
        Command::Scan(ref args) => scan::run(args, &global).await,
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `TACK_LOG` overrides the level
/// picked from `--verbose` / `--quiet`.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(default_log_level(global.verbose, global.quiet))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .init();
}

fn default_log_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}
