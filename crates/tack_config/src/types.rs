//! Configuration types deserialized from `tack.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Default variant separator.
pub const DEFAULT_SEPARATOR: &str = ":";
/// Default capacity of the per-extractor line cache.
pub const DEFAULT_LINE_CACHE_CAPACITY: u64 = 25_000;
/// Default number of content files read concurrently.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// The top-level configuration parsed from `tack.toml`.
///
/// Every section is optional; an empty file yields a configuration that
/// scans nothing and generates only what the stylesheet itself declares.
#[derive(Debug, Default, Deserialize)]
pub struct TackConfig {
    /// Where candidates are scanned from.
    #[serde(default)]
    pub content: ContentConfig,
    /// Generator tuning.
    #[serde(default)]
    pub options: OptionsConfig,
    /// Selector or at-rule to declarations, emitted into the `base` layer.
    #[serde(default)]
    pub base: BTreeMap<String, String>,
    /// Class name to declarations, emitted into the `components` layer.
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Class name to declarations, emitted into the `utilities` layer.
    #[serde(default)]
    pub utilities: BTreeMap<String, String>,
    /// Property to value, collected into the universal `defaults` rule.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    /// Variant name to a selector template (`&:hover`) or an at-rule
    /// wrapper (`@media (min-width: 768px)`).
    #[serde(default)]
    pub variants: BTreeMap<String, String>,
}

/// The `[content]` section.
#[derive(Debug, Default, Deserialize)]
pub struct ContentConfig {
    /// Paths or glob patterns, relative to the configuration file.
    ///
    /// Accepts a single string or a list.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub files: Vec<String>,
    /// Inline content blobs scanned alongside the files.
    #[serde(default)]
    pub raw: Vec<RawContent>,
    /// File extension to the built-in transform applied before extraction.
    #[serde(default)]
    pub transform: BTreeMap<String, TransformKind>,
}

/// An inline content blob from `[[content.raw]]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawContent {
    /// The text to scan.
    pub content: String,
    /// The extension selecting the handler, e.g. `"html"`.
    #[serde(default = "default_raw_extension")]
    pub extension: String,
}

fn default_raw_extension() -> String {
    "html".to_string()
}

/// Built-in content transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Strips Svelte `class:` directive prefixes so `class:p-4={x}` yields `p-4`.
    Svelte,
}

/// The `[options]` section.
#[derive(Debug, Deserialize)]
pub struct OptionsConfig {
    /// Separator between variant prefixes and the utility name.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Marks every generated utility declaration `!important`.
    #[serde(default)]
    pub important: bool,
    /// Maximum number of memoized lines per extractor.
    #[serde(default = "default_line_cache_capacity")]
    pub line_cache_capacity: u64,
    /// Number of content files read concurrently in one batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            important: false,
            line_cache_capacity: DEFAULT_LINE_CACHE_CAPACITY,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_line_cache_capacity() -> u64 {
    DEFAULT_LINE_CACHE_CAPACITY
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// Deserializes a field that can be either a single string or a list of strings.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
