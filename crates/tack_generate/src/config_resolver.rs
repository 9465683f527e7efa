//! A resolver driven by the `[base]`, `[defaults]`, `[components]`,
//! `[utilities]` and `[variants]` tables of `tack.toml`.

use crate::escape::escape_class_name;
use crate::fragment::Fragment;
use crate::layer::Layer;
use crate::resolver::RuleResolver;
use std::collections::BTreeMap;
use tack_common::Candidate;
use tack_config::TackConfig;
use tack_css::{AstNode, ParseError};
use tack_source::FileId;
use thiserror::Error;

/// Selector of the universal defaults rule.
pub const DEFAULTS_SELECTOR: &str = "*, ::before, ::after";

/// A configuration entry whose declaration body does not parse.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The body of `[table].key` is not a valid declaration block.
    #[error("invalid declarations for `{table}.{key}`: {source}")]
    InvalidBody {
        /// The configuration table.
        table: &'static str,
        /// The entry key.
        key: String,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },
}

#[derive(Debug, Clone)]
enum VariantKind {
    /// `&:hover`, `.dark &`: `&` is replaced by the current selector.
    Selector(String),
    /// `@media (min-width: 768px)`: wraps the rule.
    AtRule(String),
}

/// Resolves candidates against the lookup tables of a [`TackConfig`].
///
/// The not-on-demand candidate produces the `[defaults]` rule and every
/// `[base]` entry. Any other candidate is split into variant prefixes and a
/// base class name; the class is looked up in `[utilities]` then
/// `[components]`, and every prefix must name a `[variants]` entry. A
/// leading `!` on the class marks its declarations `!important`.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    separator: String,
    important: bool,
    always: Vec<Fragment>,
    components: BTreeMap<String, Vec<AstNode>>,
    utilities: BTreeMap<String, Vec<AstNode>>,
    variants: BTreeMap<String, VariantKind>,
}

impl ConfigResolver {
    /// Builds a resolver, parsing every declaration body up front.
    pub fn new(config: &TackConfig) -> Result<Self, ResolverError> {
        let mut always = Vec::new();
        if !config.defaults.is_empty() {
            let decls = config
                .defaults
                .iter()
                .map(|(property, value)| AstNode::decl(property.as_str(), value.as_str(), false))
                .collect();
            always.push(Fragment::new(
                AstNode::rule(DEFAULTS_SELECTOR, decls),
                Layer::Defaults,
            ));
        }
        for (selector, body) in &config.base {
            let nodes = parse_body("base", selector, body)?;
            always.push(Fragment::new(AstNode::rule(selector.as_str(), nodes), Layer::Base));
        }

        let components = parse_table("components", &config.components)?;
        let utilities = parse_table("utilities", &config.utilities)?;

        let variants = config
            .variants
            .iter()
            .map(|(name, template)| {
                let template = template.trim();
                let kind = if template.starts_with('@') {
                    VariantKind::AtRule(template.to_string())
                } else {
                    VariantKind::Selector(template.to_string())
                };
                (name.clone(), kind)
            })
            .collect();

        Ok(Self {
            separator: config.options.separator.clone(),
            important: config.options.important,
            always,
            components,
            utilities,
            variants,
        })
    }

    fn lookup(&self, class: &str) -> Option<(&[AstNode], Layer)> {
        if let Some(nodes) = self.utilities.get(class) {
            return Some((nodes, Layer::Utilities));
        }
        self.components
            .get(class)
            .map(|nodes| (nodes.as_slice(), Layer::Components))
    }
}

impl RuleResolver for ConfigResolver {
    fn resolve(&self, candidate: &Candidate) -> Vec<Fragment> {
        if candidate.is_not_on_demand() {
            return self.always.clone();
        }

        let (prefixes, base) = candidate.split_variants(&self.separator);
        let (class, bang) = match base.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (base, false),
        };
        let Some((body, layer)) = self.lookup(class) else {
            return Vec::new();
        };
        let mut variants = Vec::with_capacity(prefixes.len());
        for prefix in &prefixes {
            match self.variants.get(*prefix) {
                Some(kind) => variants.push(kind),
                None => return Vec::new(),
            }
        }

        let important = bang || (self.important && layer == Layer::Utilities);
        let mut nodes = body.to_vec();
        if important {
            mark_important(&mut nodes);
        }

        // Innermost prefix applies first: `hover:focus:x` gives `.x:focus:hover`.
        let mut selector = format!(".{}", escape_class_name(candidate.as_str()));
        for kind in variants.iter().rev() {
            if let VariantKind::Selector(template) = kind {
                selector = template.replace('&', &selector);
            }
        }
        let mut node = AstNode::rule(selector, nodes);
        for kind in variants.iter().rev() {
            if let VariantKind::AtRule(wrapper) = kind {
                node = AstNode::rule(wrapper.as_str(), vec![node]);
            }
        }

        if variants.is_empty() {
            vec![Fragment::new(node, layer)]
        } else {
            vec![Fragment::variant(node, layer)]
        }
    }
}

fn parse_table(
    table: &'static str,
    entries: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, Vec<AstNode>>, ResolverError> {
    entries
        .iter()
        .map(|(key, body)| Ok((key.clone(), parse_body(table, key, body)?)))
        .collect()
}

/// Parses a declaration body by wrapping it in a throwaway rule, so the
/// last declaration may omit its `;` and nested `&` rules are allowed.
fn parse_body(table: &'static str, key: &str, body: &str) -> Result<Vec<AstNode>, ResolverError> {
    let wrapped = format!("& {{ {body} }}");
    let parsed = tack_css::parse(&wrapped, FileId::DUMMY).map_err(|source| {
        ResolverError::InvalidBody {
            table,
            key: key.to_string(),
            source,
        }
    })?;
    let mut nodes = parsed
        .into_iter()
        .find_map(|node| match node {
            AstNode::Rule(rule) => Some(rule.nodes),
            _ => None,
        })
        .unwrap_or_default();
    for node in &mut nodes {
        node.clear_spans();
    }
    Ok(nodes)
}

fn mark_important(nodes: &mut [AstNode]) {
    tack_css::walk_mut(nodes, &mut |node| {
        if let AstNode::Declaration(decl) = node {
            decl.important = true;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tack_common::NOT_ON_DEMAND;
    use tack_config::load_config_from_str;
    use tack_css::{print, PrintStyle};

    const CONFIG: &str = r#"
[defaults]
"box-sizing" = "border-box"

[base]
body = "margin: 0"

[components]
btn = "padding: 0.5rem 1rem; border-radius: 0.25rem"

[utilities]
"text-red-500" = "color: #ef4444"
"p-4" = "padding: 1rem;"
"underline" = "text-decoration-line: underline"

[variants]
hover = "&:hover"
focus = "&:focus"
md = "@media (min-width: 768px)"
"#;

    fn resolver() -> ConfigResolver {
        ConfigResolver::new(&load_config_from_str(CONFIG).unwrap()).unwrap()
    }

    fn css(fragments: &[Fragment]) -> String {
        let nodes: Vec<AstNode> = fragments.iter().map(|f| f.node.clone()).collect();
        print(&nodes, PrintStyle::Minified)
    }

    #[test]
    fn not_on_demand_emits_defaults_and_base() {
        let fragments = resolver().resolve(&Candidate::new(NOT_ON_DEMAND));
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].layer, Layer::Defaults);
        assert_eq!(fragments[1].layer, Layer::Base);
        assert_eq!(
            css(&fragments[..1]),
            "*, ::before, ::after{box-sizing:border-box}"
        );
    }

    #[test]
    fn utility_and_component_lookup() {
        let r = resolver();
        let utility = r.resolve(&Candidate::new("text-red-500"));
        assert_eq!(utility[0].layer, Layer::Utilities);
        assert_eq!(css(&utility), ".text-red-500{color:#ef4444}");

        let component = r.resolve(&Candidate::new("btn"));
        assert_eq!(component[0].layer, Layer::Components);
        assert_eq!(
            css(&component),
            ".btn{padding:0.5rem 1rem;border-radius:0.25rem}"
        );
    }

    #[test]
    fn unknown_candidates_do_not_match() {
        let r = resolver();
        assert!(r.resolve(&Candidate::new("span")).is_empty());
        assert!(r.resolve(&Candidate::new("dark:p-4")).is_empty());
    }

    #[test]
    fn variants_stack() {
        let fragments = resolver().resolve(&Candidate::new("md:hover:focus:underline"));
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].layer, Layer::Variants);
        assert_eq!(fragments[0].origin, Some(Layer::Utilities));
        assert_eq!(
            css(&fragments),
            "@media (min-width: 768px){.md\\:hover\\:focus\\:underline:focus:hover{text-decoration-line:underline}}"
        );
    }

    #[test]
    fn component_variant_keeps_origin() {
        let fragments = resolver().resolve(&Candidate::new("hover:btn"));
        assert_eq!(fragments[0].origin, Some(Layer::Components));
    }

    #[test]
    fn bang_prefix_marks_important() {
        let fragments = resolver().resolve(&Candidate::new("!p-4"));
        assert_eq!(css(&fragments), ".\\!p-4{padding:1rem!important}");
    }

    #[test]
    fn global_important_applies_to_utilities_only() {
        let mut config = load_config_from_str(CONFIG).unwrap();
        config.options.important = true;
        let r = ConfigResolver::new(&config).unwrap();
        assert_eq!(
            css(&r.resolve(&Candidate::new("p-4"))),
            ".p-4{padding:1rem!important}"
        );
        assert_eq!(
            css(&r.resolve(&Candidate::new("btn"))),
            ".btn{padding:0.5rem 1rem;border-radius:0.25rem}"
        );
    }

    #[test]
    fn generated_nodes_carry_no_spans() {
        let fragments = resolver().resolve(&Candidate::new("p-4"));
        assert!(fragments[0].node.span().is_none());
    }

    #[test]
    fn invalid_body_is_reported() {
        let config = load_config_from_str("[utilities]\nbad = \"content: 'oops\"\n").unwrap();
        let err = ConfigResolver::new(&config).unwrap_err();
        assert!(err.to_string().starts_with("invalid declarations for `utilities.bad`"));
    }
}
