//! The rule-synthesis seam.

use crate::fragment::Fragment;
use tack_common::Candidate;

/// Turns a candidate into generated CSS.
///
/// Returning an empty list marks the candidate as "no match"; it is cached
/// as such and never resolved again in the same session. The
/// [`NOT_ON_DEMAND`](tack_common::NOT_ON_DEMAND) candidate is passed on every
/// build so resolvers can emit content-independent rules.
pub trait RuleResolver: Send + Sync {
    /// Resolves one candidate.
    fn resolve(&self, candidate: &Candidate) -> Vec<Fragment>;
}
