//! State carried between compiles.

use std::collections::BTreeSet;
use tack_common::Candidate;
use tack_config::OptionsConfig;
use tack_extract::ExtractorState;
use tack_generate::RuleCache;

/// Everything a rebuild reuses from the previous one.
///
/// A session is owned by the caller and passed to each compile by `&mut`.
/// It only grows: candidates are never forgotten, so a rebuild that scans
/// only changed files still emits rules for everything seen before.
#[derive(Default)]
pub struct Session {
    /// Line caches and file change tracking.
    pub extractor: ExtractorState,
    /// Classification cache and stylesheet snapshot.
    pub rules: RuleCache,
    /// Every candidate scanned so far.
    pub candidates: BTreeSet<Candidate>,
}

impl Session {
    /// Creates an empty session sized from the `[options]` table.
    pub fn new(options: &OptionsConfig) -> Self {
        Self {
            extractor: ExtractorState::new(options.line_cache_capacity),
            rules: RuleCache::new(),
            candidates: BTreeSet::new(),
        }
    }
}
