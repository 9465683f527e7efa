//! Batched, memoized candidate scanning.

use crate::cache::LineCaches;
use crate::content::ChangedContent;
use crate::error::ExtractError;
use crate::handler::{ContentHandler, HandlerRegistry};
use crate::tracker::ChangeTracker;
use futures::future::try_join_all;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tack_common::{Candidate, CONTINUE_SENTINEL};

/// Extraction state that outlives a single scan: line caches and the
/// per-file change tracker.
#[derive(Default)]
pub struct ExtractorState {
    /// Memoized line results, one cache per extractor.
    pub line_caches: LineCaches,
    /// Content hashes of files already scanned.
    pub tracker: ChangeTracker,
}

impl ExtractorState {
    /// Creates empty state whose line caches hold `line_cache_capacity` lines each.
    pub fn new(line_cache_capacity: u64) -> Self {
        Self {
            line_caches: LineCaches::new(line_cache_capacity),
            tracker: ChangeTracker::new(),
        }
    }
}

#[derive(Debug, Default)]
struct ScanStats {
    lines: usize,
    hits: usize,
    misses: usize,
    unchanged_files: usize,
}

/// Extracts the distinct candidates from `changed`.
///
/// Inline items are extracted immediately. File items are read
/// concurrently, `batch_size` at a time; a batch is extracted and merged
/// only once all of its reads have completed, and any unreadable file fails
/// the whole scan. Files whose content hash matches the last successful
/// scan are skipped. Within one scan a trimmed line is extracted at most
/// once, and the continue sentinel never appears in the result.
pub async fn scan(
    changed: &[ChangedContent],
    handlers: &HandlerRegistry,
    state: &mut ExtractorState,
    batch_size: usize,
) -> Result<HashSet<Candidate>, ExtractError> {
    let mut candidates = HashSet::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut stats = ScanStats::default();
    let mut files: Vec<(&PathBuf, &str)> = Vec::new();

    for item in changed {
        match item {
            ChangedContent::Inline { content, extension } => {
                let handler = handlers.handler_for(extension);
                collect_lines(
                    handler.as_ref(),
                    content,
                    &mut state.line_caches,
                    &mut seen,
                    &mut candidates,
                    &mut stats,
                );
            }
            ChangedContent::File { path, extension } => files.push((path, extension.as_str())),
        }
    }

    let mut scanned = Vec::new();
    for (index, batch) in files.chunks(batch_size.max(1)).enumerate() {
        let contents = try_join_all(batch.iter().map(|(path, _)| read_content(path))).await?;

        for ((path, extension), content) in batch.iter().zip(contents) {
            let Some(hash) = state.tracker.check(path, &content) else {
                stats.unchanged_files += 1;
                continue;
            };
            scanned.push(((*path).clone(), hash));

            let handler = handlers.handler_for(extension);
            collect_lines(
                handler.as_ref(),
                &content,
                &mut state.line_caches,
                &mut seen,
                &mut candidates,
                &mut stats,
            );
        }
        tracing::debug!(batch = index + 1, files = batch.len(), "content batch scanned");
    }

    for (path, hash) in scanned {
        state.tracker.record(path, hash);
    }

    tracing::debug!(
        candidates = candidates.len(),
        lines = stats.lines,
        cache_hits = stats.hits,
        cache_misses = stats.misses,
        unchanged_files = stats.unchanged_files,
        "scan complete"
    );
    Ok(candidates)
}

/// Reads a content file. Invalid UTF-8 is replaced, not rejected.
async fn read_content(path: &Path) -> Result<String, ExtractError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExtractError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

fn collect_lines(
    handler: &dyn ContentHandler,
    content: &str,
    caches: &mut LineCaches,
    seen: &mut HashSet<String>,
    out: &mut HashSet<Candidate>,
    stats: &mut ScanStats,
) {
    let transformed = handler.transform(content);
    let cache = caches.for_extractor(handler.extractor_key());

    for line in transformed.split('\n') {
        let line = line.trim();
        if seen.contains(line) {
            continue;
        }
        seen.insert(line.to_string());
        stats.lines += 1;

        if let Some(matches) = cache.get(line) {
            stats.hits += 1;
            out.extend(matches.iter().cloned());
            continue;
        }

        stats.misses += 1;
        let mut matches: Vec<Candidate> = handler
            .extract(line)
            .into_iter()
            .filter(|c| c.as_str() != CONTINUE_SENTINEL)
            .collect();
        matches.sort();
        matches.dedup();
        out.extend(matches.iter().cloned());
        cache.insert(line.to_string(), Arc::from(matches));
    }
}
