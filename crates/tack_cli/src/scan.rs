//! `tack scan`: list the candidates found in the configured content.

use std::collections::BTreeSet;

use tack_diagnostics::DiagnosticSink;
use tack_expand::{CompileError, Pipeline};
use tack_extract::{scan, ExtractorState};
use tack_source::SourceDb;

use crate::project::{finish, load_project};
use crate::{GlobalArgs, ReportFormat, ScanArgs};

/// Runs the `tack scan` command.
///
/// Prints the sorted candidates one per line, or as a JSON array.
pub async fn run(args: &ScanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    match collect(global).await {
        Ok(candidates) => {
            match args.format {
                ReportFormat::Text => {
                    for candidate in &candidates {
                        println!("{candidate}");
                    }
                }
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&candidates)?),
            }
            if !global.quiet {
                eprintln!("   Found {} candidate(s)", candidates.len());
            }
            Ok(0)
        }
        Err(err) => {
            let sink = DiagnosticSink::new();
            sink.emit(err.to_diagnostic());
            Ok(finish(&sink, &SourceDb::new(), args.format, global))
        }
    }
}

async fn collect(global: &GlobalArgs) -> Result<BTreeSet<String>, CompileError> {
    let project = load_project(global)?;
    let pipeline = Pipeline::from_config(&project.config, &project.root)?;
    let mut state = ExtractorState::new(project.config.options.line_cache_capacity);
    let found = scan(
        &pipeline.content,
        &pipeline.handlers,
        &mut state,
        pipeline.options.batch_size,
    )
    .await?;
    Ok(found.into_iter().map(|c| c.as_str().to_string()).collect())
}
