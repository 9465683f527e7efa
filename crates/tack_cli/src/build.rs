//! `tack build`: compile one stylesheet.
//!
//! 1. Load `tack.toml` (see [`load_project`])
//! 2. Read the input stylesheet from `--input` or stdin
//! 3. Resolve content and compile
//! 4. Write CSS (or the AST as JSON) to `--output` or stdout
//! 5. Render diagnostics after the output

use std::io::{self, Read, Write};
use std::path::PathBuf;

use tack_css::{print, PrintStyle};
use tack_diagnostics::DiagnosticSink;
use tack_expand::{compile, CompileError, Pipeline, Session};
use tack_source::SourceDb;

use crate::project::{finish, load_project};
use crate::{BuildArgs, GlobalArgs};

/// Runs the `tack build` command.
///
/// Returns exit code 0 on success and 1 if any error was reported.
pub async fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();

    let project = match load_project(global) {
        Ok(project) => project,
        Err(err) => return Ok(fail(CompileError::from(err), &sink, &source_db, args, global)),
    };

    let file = match &args.input {
        Some(path) => source_db.load_file(&PathBuf::from(path))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            source_db.add_source("<stdin>", text)
        }
    };

    let pipeline = match Pipeline::from_config(&project.config, &project.root) {
        Ok(pipeline) => pipeline,
        Err(err) => return Ok(fail(err, &sink, &source_db, args, global)),
    };
    let mut session = Session::new(&project.config.options);

    let ast = match compile(&source_db, file, &pipeline, &mut session, &sink).await {
        Ok(ast) => ast,
        Err(err) => return Ok(fail(err, &sink, &source_db, args, global)),
    };

    let rendered = if args.ast {
        serde_json::to_string_pretty(&ast)?
    } else if args.minify {
        print(&ast, PrintStyle::Minified)
    } else {
        print(&ast, PrintStyle::Pretty)
    };
    match &args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }

    Ok(finish(&sink, &source_db, args.format, global))
}

/// Reports a fatal error together with any warnings emitted before it.
fn fail(
    err: CompileError,
    sink: &DiagnosticSink,
    source_db: &SourceDb,
    args: &BuildArgs,
    global: &GlobalArgs,
) -> i32 {
    tracing::debug!(error = %err, "compile failed");
    sink.emit(err.to_diagnostic());
    finish(sink, source_db, args.format, global)
}
