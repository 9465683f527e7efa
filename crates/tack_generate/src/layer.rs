//! Output layers.

use std::fmt;

/// The five buckets generated CSS is grouped into, in output order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Layer {
    /// Universal resets, emitted ahead of `base`.
    Defaults,
    /// Element-level base styles.
    Base,
    /// Component classes.
    Components,
    /// Single-purpose utility classes.
    Utilities,
    /// Rules produced by variant prefixes such as `hover:` or `md:`.
    Variants,
}

impl Layer {
    /// All layers in output order.
    pub const ALL: [Layer; 5] = [
        Layer::Defaults,
        Layer::Base,
        Layer::Components,
        Layer::Utilities,
        Layer::Variants,
    ];

    /// Returns the lowercase layer name.
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Defaults => "defaults",
            Layer::Base => "base",
            Layer::Components => "components",
            Layer::Utilities => "utilities",
            Layer::Variants => "variants",
        }
    }

    /// Parses the parameter of a `@tailwind` directive. `defaults` has no
    /// directive of its own and is rejected.
    pub fn from_directive(params: &str) -> Option<Layer> {
        match params {
            "base" => Some(Layer::Base),
            "components" => Some(Layer::Components),
            "utilities" => Some(Layer::Utilities),
            "variants" => Some(Layer::Variants),
            _ => None,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_names() {
        for layer in [Layer::Base, Layer::Components, Layer::Utilities, Layer::Variants] {
            assert_eq!(Layer::from_directive(layer.as_str()), Some(layer));
        }
        assert_eq!(Layer::from_directive("defaults"), None);
        assert_eq!(Layer::from_directive("screens"), None);
    }

    #[test]
    fn output_order() {
        let mut shuffled = vec![Layer::Variants, Layer::Base, Layer::Defaults];
        shuffled.sort();
        assert_eq!(shuffled, vec![Layer::Defaults, Layer::Base, Layer::Variants]);
    }
}
