//! Candidate classification and stylesheet partitioning.

use crate::cache::{Classification, RuleCache};
use crate::resolver::RuleResolver;
use crate::stylesheet::Stylesheet;
use std::sync::Arc;
use tack_common::Candidate;

/// Classifies `candidates` and returns the current stylesheet.
///
/// Candidates are sorted before classification and each one is resolved at
/// most once per cache. The returned snapshot is the same `Arc` as the
/// previous call's unless the cache grew, so an unchanged build does no
/// partitioning work.
pub fn generate<'a>(
    candidates: impl IntoIterator<Item = &'a Candidate>,
    resolver: &dyn RuleResolver,
    cache: &mut RuleCache,
) -> Arc<Stylesheet> {
    let mut sorted: Vec<&Candidate> = candidates.into_iter().collect();
    sorted.sort();
    sorted.dedup();

    let mut matched = 0usize;
    let mut unmatched = 0usize;
    for candidate in sorted {
        if cache.classified.contains_key(candidate) {
            continue;
        }
        let fragments = resolver.resolve(candidate);
        let classification = if fragments.is_empty() {
            unmatched += 1;
            Classification::NoMatch
        } else {
            matched += 1;
            Classification::Matched(fragments.into_iter().map(Arc::new).collect())
        };
        cache.classified.insert(candidate.clone(), classification);
    }

    let size = cache.classified.len();
    if let Some(sheet) = cache
        .stylesheet
        .as_ref()
        .filter(|_| cache.partitioned_at == size)
    {
        tracing::debug!(classified = size, "stylesheet unchanged");
        return Arc::clone(sheet);
    }

    let sheet = Arc::new(cache.partition());
    tracing::debug!(
        classified = size,
        matched,
        unmatched,
        fragments = sheet.len(),
        "stylesheet rebuilt"
    );
    cache.stylesheet = Some(Arc::clone(&sheet));
    cache.partitioned_at = size;
    sheet
}
