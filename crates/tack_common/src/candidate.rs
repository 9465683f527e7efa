//! Utility-class candidates discovered in template content.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Candidate that is always present in a build so that layers which do not
/// depend on scanned content (base styles, defaults) are generated.
pub const NOT_ON_DEMAND: &str = "*";

/// Reserved token an extractor may emit to mean "keep going"; it is never a
/// real candidate and is dropped from extraction output.
pub const CONTINUE_SENTINEL: &str = "!*";

/// A literal token found in source content that may name a utility class.
///
/// Candidates are opaque: the extractor does not know whether a token maps to
/// a utility. They compare by exact string equality and order
/// lexicographically (byte order), which is what makes generation order
/// deterministic regardless of scan order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    /// Creates a candidate from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the candidate text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the [`NOT_ON_DEMAND`] candidate.
    pub fn is_not_on_demand(&self) -> bool {
        self.0 == NOT_ON_DEMAND
    }

    /// Splits the candidate into its variant prefixes and the base utility
    /// name using the given separator.
    ///
    /// Separators inside square brackets are part of an arbitrary value and
    /// do not split, so `md:[mask:url(a)]` has one variant.
    pub fn split_variants(&self, separator: &str) -> (Vec<&str>, &str) {
        if separator.is_empty() {
            return (Vec::new(), &self.0);
        }
        let bytes = self.0.as_bytes();
        let sep = separator.as_bytes();
        let mut parts = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                _ if depth == 0 && bytes[i..].starts_with(sep) => {
                    parts.push(&self.0[start..i]);
                    i += sep.len();
                    start = i;
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
        (parts, &self.0[start..])
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Candidate({:?})", self.0)
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Candidate {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Candidate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ordering_is_lexicographic() {
        let mut v = vec![
            Candidate::from("text-red-500"),
            Candidate::from("bg-white"),
            Candidate::from("p-4"),
        ];
        v.sort();
        let names: Vec<_> = v.iter().map(Candidate::as_str).collect();
        assert_eq!(names, vec!["bg-white", "p-4", "text-red-500"]);
    }

    #[test]
    fn borrow_lookup_by_str() {
        let set: HashSet<Candidate> = [Candidate::from("flex")].into_iter().collect();
        assert!(set.contains("flex"));
        assert!(!set.contains("grid"));
    }

    #[test]
    fn split_variants_simple() {
        let c = Candidate::from("md:hover:text-red-500");
        let (variants, base) = c.split_variants(":");
        assert_eq!(variants, vec!["md", "hover"]);
        assert_eq!(base, "text-red-500");
    }

    #[test]
    fn split_variants_respects_brackets() {
        let c = Candidate::from("md:[mask-type:luminance]");
        let (variants, base) = c.split_variants(":");
        assert_eq!(variants, vec!["md"]);
        assert_eq!(base, "[mask-type:luminance]");
    }

    #[test]
    fn split_variants_custom_separator() {
        let c = Candidate::from("hover__underline");
        let (variants, base) = c.split_variants("__");
        assert_eq!(variants, vec!["hover"]);
        assert_eq!(base, "underline");
    }

    #[test]
    fn not_on_demand_marker() {
        assert!(Candidate::from(NOT_ON_DEMAND).is_not_on_demand());
        assert!(!Candidate::from("flex").is_not_on_demand());
    }

    #[test]
    fn serde_is_transparent() {
        let c = Candidate::from("p-4");
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"p-4\"");
    }
}
