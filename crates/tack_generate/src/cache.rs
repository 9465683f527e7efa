//! The per-session rule cache.

use crate::fragment::Fragment;
use crate::stylesheet::Stylesheet;
use std::collections::BTreeMap;
use std::sync::Arc;
use tack_common::Candidate;

/// The outcome of resolving one candidate.
#[derive(Debug, Clone)]
pub enum Classification {
    /// The candidate generated these fragments.
    Matched(Vec<Arc<Fragment>>),
    /// The candidate is not a utility; it is not resolved again.
    NoMatch,
}

/// Classification results and the last stylesheet built from them.
///
/// The cache only grows. The stylesheet snapshot is rebuilt by
/// [`generate`](crate::generate) only when the number of classified
/// candidates changed since it was taken.
#[derive(Debug, Default)]
pub struct RuleCache {
    pub(crate) classified: BTreeMap<Candidate, Classification>,
    pub(crate) stylesheet: Option<Arc<Stylesheet>>,
    pub(crate) partitioned_at: usize,
}

impl RuleCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classified candidates, matched or not.
    pub fn len(&self) -> usize {
        self.classified.len()
    }

    /// Returns `true` if nothing has been classified yet.
    pub fn is_empty(&self) -> bool {
        self.classified.is_empty()
    }

    /// Returns the classification of `candidate`, if it has been seen.
    pub fn classification(&self, candidate: &str) -> Option<&Classification> {
        self.classified.get(candidate)
    }

    /// Returns the current stylesheet snapshot.
    pub fn stylesheet(&self) -> Option<&Arc<Stylesheet>> {
        self.stylesheet.as_ref()
    }

    pub(crate) fn partition(&self) -> Stylesheet {
        let mut sheet = Stylesheet::default();
        for classification in self.classified.values() {
            if let Classification::Matched(fragments) = classification {
                for fragment in fragments {
                    sheet.push(Arc::clone(fragment));
                }
            }
        }
        sheet
    }
}
