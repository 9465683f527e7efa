//! Generated fragments partitioned by layer.

use crate::fragment::Fragment;
use crate::layer::Layer;
use std::sync::Arc;

/// A snapshot of every generated fragment, grouped into the five layers.
///
/// Within a bucket, fragments are ordered by candidate and then by the
/// order the resolver returned them, so a stylesheet never depends on the
/// order candidates were discovered in.
#[derive(Debug, Default)]
pub struct Stylesheet {
    defaults: Vec<Arc<Fragment>>,
    base: Vec<Arc<Fragment>>,
    components: Vec<Arc<Fragment>>,
    utilities: Vec<Arc<Fragment>>,
    variants: Vec<Arc<Fragment>>,
}

impl Stylesheet {
    /// Returns the fragments of one layer.
    pub fn bucket(&self, layer: Layer) -> &[Arc<Fragment>] {
        match layer {
            Layer::Defaults => &self.defaults,
            Layer::Base => &self.base,
            Layer::Components => &self.components,
            Layer::Utilities => &self.utilities,
            Layer::Variants => &self.variants,
        }
    }

    pub(crate) fn push(&mut self, fragment: Arc<Fragment>) {
        let bucket = match fragment.layer {
            Layer::Defaults => &mut self.defaults,
            Layer::Base => &mut self.base,
            Layer::Components => &mut self.components,
            Layer::Utilities => &mut self.utilities,
            Layer::Variants => &mut self.variants,
        };
        bucket.push(fragment);
    }

    /// Total number of fragments across all layers.
    pub fn len(&self) -> usize {
        Layer::ALL.iter().map(|layer| self.bucket(*layer).len()).sum()
    }

    /// Returns `true` if no layer has any fragment.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
