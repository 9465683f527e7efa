//! Per-extension content handlers.

use crate::extractor::extract_candidates;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use tack_common::Candidate;
use tack_config::{ContentConfig, TransformKind};

/// Turns a content file into candidates.
///
/// `transform` runs once on the whole text; `extract` then runs on each
/// distinct trimmed line. Handlers that share an extractor should return
/// the same [`extractor_key`](Self::extractor_key) so they share one line
/// cache.
pub trait ContentHandler: Send + Sync {
    /// Rewrites content before extraction. The default leaves it unchanged.
    fn transform<'a>(&self, content: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(content)
    }

    /// Extracts candidate tokens from one trimmed line.
    fn extract(&self, line: &str) -> Vec<Candidate>;

    /// Identifies the extraction function for line memoization.
    fn extractor_key(&self) -> &str {
        "default"
    }
}

/// The built-in handler: no transform, [`extract_candidates`] per line.
#[derive(Debug, Default)]
pub struct DefaultHandler;

impl ContentHandler for DefaultHandler {
    fn extract(&self, line: &str) -> Vec<Candidate> {
        extract_candidates(line)
    }
}

/// Strips Svelte `class:` directive prefixes, so `class:p-4={on}` yields
/// `p-4`, then extracts like [`DefaultHandler`].
#[derive(Debug, Default)]
pub struct SvelteHandler;

impl ContentHandler for SvelteHandler {
    fn transform<'a>(&self, content: &'a str) -> Cow<'a, str> {
        strip_class_directives(content)
    }

    fn extract(&self, line: &str) -> Vec<Candidate> {
        extract_candidates(line)
    }
}

/// Replaces every `class:` at the start of the text or after whitespace,
/// together with that whitespace, by a single space.
fn strip_class_directives(content: &str) -> Cow<'_, str> {
    const PREFIX: &str = "class:";
    if !content.contains(PREFIX) {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    let mut at_start = true;
    while let Some(idx) = rest.find(PREFIX) {
        let before = &rest[..idx];
        let prev = before.chars().next_back();
        match prev {
            None if at_start => {
                out.push(' ');
            }
            Some(ws) if ws.is_whitespace() => {
                out.push_str(&before[..idx - ws.len_utf8()]);
                out.push(' ');
            }
            _ => {
                out.push_str(before);
                out.push_str(PREFIX);
            }
        }
        rest = &rest[idx + PREFIX.len()..];
        at_start = false;
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Maps file extensions to handlers, falling back to a default.
pub struct HandlerRegistry {
    default: Arc<dyn ContentHandler>,
    by_extension: HashMap<String, Arc<dyn ContentHandler>>,
}

impl HandlerRegistry {
    /// Creates a registry with the built-in handlers: `svelte` files get
    /// [`SvelteHandler`], everything else [`DefaultHandler`].
    pub fn new() -> Self {
        let mut registry = Self {
            default: Arc::new(DefaultHandler),
            by_extension: HashMap::new(),
        };
        registry.register("svelte", Arc::new(SvelteHandler));
        registry
    }

    /// Creates the built-in registry plus the `[content.transform]` mapping.
    pub fn from_config(content: &ContentConfig) -> Self {
        let mut registry = Self::new();
        for (extension, kind) in &content.transform {
            let handler: Arc<dyn ContentHandler> = match kind {
                TransformKind::Svelte => Arc::new(SvelteHandler),
            };
            registry.register(extension, handler);
        }
        registry
    }

    /// Registers (or replaces) the handler for an extension.
    pub fn register(&mut self, extension: impl Into<String>, handler: Arc<dyn ContentHandler>) {
        self.by_extension.insert(extension.into(), handler);
    }

    /// Replaces the fallback handler.
    pub fn set_default(&mut self, handler: Arc<dyn ContentHandler>) {
        self.default = handler;
    }

    /// Returns the handler for an extension.
    pub fn handler_for(&self, extension: &str) -> &Arc<dyn ContentHandler> {
        self.by_extension.get(extension).unwrap_or(&self.default)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn svelte_strips_class_directives() {
        let out = strip_class_directives("<div class:p-4={on}\n\tclass:underline>");
        assert_eq!(out, "<div p-4={on}\n underline>");
        assert_eq!(strip_class_directives("class:flex"), " flex");
    }

    #[test]
    fn svelte_keeps_embedded_class_colon() {
        let out = strip_class_directives("myclass:x");
        assert_eq!(out, "myclass:x");
        assert!(matches!(strip_class_directives("no directives"), Cow::Borrowed(_)));
    }

    #[test]
    fn registry_falls_back_to_default() {
        let registry = HandlerRegistry::new();
        let html = registry.handler_for("html");
        assert_eq!(html.transform("class:x"), "class:x");
        let svelte = registry.handler_for("svelte");
        assert_eq!(svelte.transform("class:x"), " x");
        assert_eq!(svelte.extractor_key(), html.extractor_key());
    }

    #[test]
    fn registry_from_config_maps_transforms() {
        let content = ContentConfig {
            transform: BTreeMap::from([("md".to_string(), TransformKind::Svelte)]),
            ..ContentConfig::default()
        };
        let registry = HandlerRegistry::from_config(&content);
        assert_eq!(registry.handler_for("md").transform("class:x"), " x");
    }

    struct Upper;

    impl ContentHandler for Upper {
        fn extract(&self, line: &str) -> Vec<Candidate> {
            vec![Candidate::new(line.to_uppercase())]
        }

        fn extractor_key(&self) -> &str {
            "upper"
        }
    }

    #[test]
    fn custom_handlers_override() {
        let mut registry = HandlerRegistry::new();
        registry.register("txt", Arc::new(Upper));
        assert_eq!(
            registry.handler_for("txt").extract("abc"),
            vec![Candidate::new("ABC")]
        );
    }
}
