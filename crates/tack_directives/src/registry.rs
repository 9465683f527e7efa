//! The per-document record of declared directives.

use std::collections::BTreeSet;
use tack_common::Candidate;
use tack_source::Span;

/// The three layers that can be declared with `@tailwind` and targeted
/// with `@layer`.
pub const CORE_LAYERS: [&str; 3] = ["base", "components", "utilities"];

/// An `@apply` at-rule and the candidates it names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplySite {
    /// Candidates listed after `@apply`, in source order.
    pub candidates: Vec<Candidate>,
    /// Whether the site ends with `!important`.
    pub important: bool,
    /// Location of the at-rule.
    pub span: Option<Span>,
}

/// Which `@tailwind` layers and `@apply` sites a document contains.
///
/// Built fresh for each compile pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveRegistry {
    /// Declared layer names, with `screens` already rewritten to `variants`.
    pub tailwind: BTreeSet<String>,
    /// Every `@apply` site, in document order.
    pub apply: Vec<ApplySite>,
}

impl DirectiveRegistry {
    /// Returns `true` if `@tailwind <layer>` was declared.
    pub fn has(&self, layer: &str) -> bool {
        self.tailwind.contains(layer)
    }

    /// Returns `true` if the document declares no `@tailwind` layer at all.
    pub fn is_empty(&self) -> bool {
        self.tailwind.is_empty()
    }

    /// Returns `true` if `base`, `components` and `utilities` are all declared.
    pub fn has_all_core_layers(&self) -> bool {
        CORE_LAYERS.iter().all(|layer| self.has(layer))
    }
}

impl ApplySite {
    /// Parses the parameters of an `@apply` at-rule.
    pub fn from_params(params: &str, span: Option<Span>) -> Self {
        let mut important = false;
        let candidates = params
            .split_whitespace()
            .filter(|token| {
                if *token == "!important" {
                    important = true;
                    false
                } else {
                    true
                }
            })
            .map(Candidate::from)
            .collect();
        Self {
            candidates,
            important,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_layers() {
        let mut registry = DirectiveRegistry::default();
        assert!(registry.is_empty());
        registry.tailwind.insert("base".into());
        registry.tailwind.insert("utilities".into());
        assert!(!registry.has_all_core_layers());
        registry.tailwind.insert("components".into());
        assert!(registry.has_all_core_layers());
    }

    #[test]
    fn apply_params() {
        let site = ApplySite::from_params("font-bold  py-2 !important", None);
        assert_eq!(
            site.candidates,
            vec![Candidate::from("font-bold"), Candidate::from("py-2")]
        );
        assert!(site.important);
    }
}
