//! Generated nodes tagged with their layer.

use crate::layer::Layer;
use tack_css::AstNode;

/// A generated node plus the layer metadata the merge step needs.
///
/// The node itself is never mutated after generation; fragments are shared
/// through `Arc` between the rule cache and stylesheet snapshots and are
/// deep-cloned when spliced into a document.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// The generated rule.
    pub node: AstNode,
    /// The bucket this fragment is emitted into.
    pub layer: Layer,
    /// For [`Layer::Variants`] fragments, the layer of the utility the
    /// variant was applied to.
    pub origin: Option<Layer>,
}

impl Fragment {
    /// Creates a fragment for a non-variant layer.
    pub fn new(node: AstNode, layer: Layer) -> Self {
        Self {
            node,
            layer,
            origin: None,
        }
    }

    /// Creates a [`Layer::Variants`] fragment derived from a rule in `origin`.
    pub fn variant(node: AstNode, origin: Layer) -> Self {
        Self {
            node,
            layer: Layer::Variants,
            origin: Some(origin),
        }
    }
}
