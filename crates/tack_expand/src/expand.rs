//! The `@tailwind` expansion pass.

use crate::merge::{find_directives, merge};
use crate::session::Session;
use std::time::Instant;
use tack_common::{Candidate, NOT_ON_DEMAND};
use tack_config::{OptionsConfig, DEFAULT_BATCH_SIZE};
use tack_css::AstNode;
use tack_diagnostics::DiagnosticSink;
use tack_extract::{scan, ChangedContent, ExtractError, HandlerRegistry};
use tack_generate::{generate, RuleResolver};

/// Tuning for [`expand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Content files read concurrently per batch.
    pub batch_size: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl From<&OptionsConfig> for ExpandOptions {
    fn from(options: &OptionsConfig) -> Self {
        Self {
            batch_size: options.batch_size,
        }
    }
}

/// Expands the `@tailwind` directives of `ast` in place.
///
/// Scans `changed`, adds the result to the session's known candidates,
/// generates rules for everything known and merges the layers into the
/// document. A document with no `@tailwind` directive is returned
/// untouched and nothing is scanned. An unreadable content file fails the
/// pass before the document is modified.
pub async fn expand(
    ast: &mut Vec<AstNode>,
    changed: &[ChangedContent],
    handlers: &HandlerRegistry,
    resolver: &dyn RuleResolver,
    session: &mut Session,
    sink: &DiagnosticSink,
    options: ExpandOptions,
) -> Result<(), ExtractError> {
    if find_directives(ast).is_empty() {
        tracing::debug!("no @tailwind directives, skipping expansion");
        return Ok(());
    }

    let started = Instant::now();
    let scanned = scan(changed, handlers, &mut session.extractor, options.batch_size).await?;
    let scan_time = started.elapsed();
    let new_candidates = scanned.len();

    session.candidates.extend(scanned);
    session.candidates.insert(Candidate::new(NOT_ON_DEMAND));

    let started = Instant::now();
    let sheet = generate(&session.candidates, resolver, &mut session.rules);
    merge(ast, &sheet, sink);

    tracing::debug!(
        scanned = new_candidates,
        known = session.candidates.len(),
        fragments = sheet.len(),
        scan_ms = scan_time.as_millis() as u64,
        generate_ms = started.elapsed().as_millis() as u64,
        "expansion complete"
    );
    Ok(())
}
