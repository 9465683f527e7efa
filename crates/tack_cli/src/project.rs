//! Shared helpers for CLI commands.
//!
//! Locates and loads `tack.toml`, and renders diagnostics in the requested
//! format.

use std::path::{Path, PathBuf};

use tack_config::{load_config, ConfigError, TackConfig, CONFIG_FILE_NAME};
use tack_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use tack_source::SourceDb;

use crate::{GlobalArgs, ReportFormat};

/// A loaded configuration and the directory content paths resolve against.
pub struct Project {
    /// The parsed configuration; the default one when no file was found.
    pub config: TackConfig,
    /// The directory holding `tack.toml`, or the working directory.
    pub root: PathBuf,
}

/// Walks up from `start` looking for the nearest `tack.toml`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Loads the project configuration selected by the global flags.
///
/// `--config` may name the file or its directory. Without it, the nearest
/// `tack.toml` at or above the working directory is used; if there is none
/// the default configuration applies.
pub fn load_project(global: &GlobalArgs) -> Result<Project, ConfigError> {
    let path = match &global.config {
        Some(explicit) => {
            let path = PathBuf::from(explicit);
            if path.is_dir() {
                Some(path.join(CONFIG_FILE_NAME))
            } else {
                Some(path)
            }
        }
        None => find_config(&std::env::current_dir()?),
    };

    match path {
        Some(path) => {
            let config = load_config(&path)?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            tracing::debug!(config = %path.display(), "configuration loaded");
            Ok(Project { config, root })
        }
        None => {
            tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
            Ok(Project {
                config: TackConfig::default(),
                root: std::env::current_dir()?,
            })
        }
    }
}

/// Writes diagnostics to stderr. In quiet mode only errors are shown.
pub fn report_diagnostics(
    diagnostics: &[Diagnostic],
    source_db: &SourceDb,
    format: ReportFormat,
    global: &GlobalArgs,
) {
    let shown: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| !global.quiet || d.severity.is_error())
        .collect();
    if shown.is_empty() {
        return;
    }

    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in shown {
                eprintln!("{}", renderer.render(diag, source_db));
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&shown).unwrap_or_else(|_| "[]".to_string());
            eprintln!("{json}");
        }
    }
}

/// Drains the sink to stderr, followed by a one-line summary, and returns
/// the exit code: 1 if any error was emitted, else 0.
pub fn finish(
    sink: &DiagnosticSink,
    source_db: &SourceDb,
    format: ReportFormat,
    global: &GlobalArgs,
) -> i32 {
    let errors = sink.error_count();
    let warnings = sink.warning_count();
    report_diagnostics(&sink.take_all(), source_db, format, global);
    if !global.quiet && errors + warnings > 0 {
        eprintln!("   Result: {errors} error(s), {warnings} warning(s)");
    }
    i32::from(sink.has_errors())
}
