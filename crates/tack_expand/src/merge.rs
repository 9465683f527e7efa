//! Splicing generated layers into the document.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tack_css::AstNode;
use tack_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Label};
use tack_generate::{Fragment, Layer, Stylesheet};
use tack_source::Span;

/// Key under which the empty-utilities warning is deduplicated.
const CONTENT_PROBLEMS: &str = "content-problems";

/// Where a `@tailwind` directive sits in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveSite {
    /// Child indices from the document root down to the directive.
    pub path: Vec<usize>,
    /// The directive's source location.
    pub span: Option<Span>,
}

/// The `@tailwind` directive chosen for each layer.
#[derive(Debug, Default)]
pub struct Directives {
    sites: BTreeMap<Layer, DirectiveSite>,
}

impl Directives {
    /// Returns the directive for `layer`, if the document has one.
    pub fn get(&self, layer: Layer) -> Option<&DirectiveSite> {
        self.sites.get(&layer)
    }

    /// Returns `true` if the document declares `layer`.
    pub fn has(&self, layer: Layer) -> bool {
        self.sites.contains_key(&layer)
    }

    /// Returns `true` if the document has no `@tailwind` directive at all.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    fn span_of(&self, layer: Layer) -> Option<Span> {
        self.get(layer).and_then(|site| site.span)
    }
}

/// Locates the `@tailwind` directives of a document at any depth.
///
/// When a layer is declared more than once the last occurrence wins; the
/// earlier ones are left in the output as written.
pub fn find_directives(ast: &[AstNode]) -> Directives {
    fn go(nodes: &[AstNode], path: &mut Vec<usize>, out: &mut Directives) {
        for (index, node) in nodes.iter().enumerate() {
            let AstNode::Rule(rule) = node else {
                continue;
            };
            path.push(index);
            if let Some(("tailwind", params)) = rule.at_rule() {
                let params = if params == "screens" { "variants" } else { params };
                if let Some(layer) = Layer::from_directive(params) {
                    let site = DirectiveSite {
                        path: path.clone(),
                        span: rule.span,
                    };
                    out.sites.insert(layer, site);
                }
            }
            go(&rule.nodes, path, out);
            path.pop();
        }
    }

    let mut directives = Directives::default();
    go(ast, &mut Vec::new(), &mut directives);
    directives
}

/// Replaces the document's `@tailwind` directives with generated CSS.
///
/// Each declared layer's fragments are deep-cloned and inserted where its
/// directive was, and the directive is removed; `base` is preceded by the
/// `defaults` fragments. Clones without a location inherit the directive's
/// span. Variant fragments whose origin layer was not declared are
/// dropped; without a `@tailwind variants` directive the rest are appended
/// to the document. The contents of top-level `@layer
/// base|components|utilities` blocks are moved after the generated rules of
/// that layer; nested blocks are replaced by their contents.
///
/// Does nothing if the document has no `@tailwind` directive.
pub fn merge(ast: &mut Vec<AstNode>, sheet: &Stylesheet, sink: &DiagnosticSink) {
    if find_directives(ast).is_empty() {
        return;
    }

    let mut authored = BTreeMap::new();
    take_layer_blocks(ast, &mut authored);
    let directives = find_directives(ast);

    let mut plan: HashMap<Vec<usize>, Vec<AstNode>> = HashMap::new();
    for layer in [Layer::Base, Layer::Components, Layer::Utilities] {
        let Some(site) = directives.get(layer) else {
            continue;
        };
        let mut nodes = Vec::new();
        if layer == Layer::Base {
            nodes.extend(clone_all(sheet.bucket(Layer::Defaults), site.span));
        }
        nodes.extend(clone_all(sheet.bucket(layer), site.span));
        nodes.extend(authored.remove(&layer).unwrap_or_default());
        plan.insert(site.path.clone(), nodes);
    }

    let variants: Vec<&Arc<Fragment>> = sheet
        .bucket(Layer::Variants)
        .iter()
        .filter(|fragment| match fragment.origin {
            Some(origin @ (Layer::Components | Layer::Utilities)) => directives.has(origin),
            _ => true,
        })
        .collect();

    let mut trailing = Vec::new();
    match directives.get(Layer::Variants) {
        Some(site) => {
            let nodes = variants
                .iter()
                .map(|fragment| clone_fragment(fragment, site.span))
                .collect();
            plan.insert(site.path.clone(), nodes);
        }
        None => {
            trailing = variants
                .iter()
                .map(|fragment| {
                    let span = fragment.origin.and_then(|origin| directives.span_of(origin));
                    clone_fragment(fragment, span)
                })
                .collect();
        }
    }

    splice(ast, &mut Vec::new(), &mut plan);
    ast.extend(trailing);

    if let Some(site) = directives.get(Layer::Utilities) {
        let utility_variants = variants
            .iter()
            .any(|fragment| fragment.origin == Some(Layer::Utilities));
        if sheet.bucket(Layer::Utilities).is_empty() && !utility_variants {
            warn_no_utilities(sink, site.span.unwrap_or(Span::DUMMY));
        }
    }
}

fn clone_fragment(fragment: &Fragment, span: Option<Span>) -> AstNode {
    let mut node = fragment.node.clone();
    if let Some(span) = span {
        node.backfill_span(span);
    }
    node
}

fn clone_all(fragments: &[Arc<Fragment>], span: Option<Span>) -> impl Iterator<Item = AstNode> + '_ {
    fragments
        .iter()
        .map(move |fragment| clone_fragment(fragment, span))
}

fn authored_layer(node: &AstNode) -> Option<Layer> {
    match node.at_rule()? {
        ("layer", "base") => Some(Layer::Base),
        ("layer", "components") => Some(Layer::Components),
        ("layer", "utilities") => Some(Layer::Utilities),
        _ => None,
    }
}

/// Removes top-level `@layer` blocks for the core layers, collecting their
/// children in document order. Blocks nested in another rule are unwrapped
/// in place so they keep their enclosing at-rule.
fn take_layer_blocks(nodes: &mut Vec<AstNode>, out: &mut BTreeMap<Layer, Vec<AstNode>>) {
    for mut node in std::mem::take(nodes) {
        let layer = authored_layer(&node);
        if let AstNode::Rule(rule) = &mut node {
            unwrap_layer_blocks(&mut rule.nodes);
            if let Some(layer) = layer {
                out.entry(layer).or_default().append(&mut rule.nodes);
                continue;
            }
        }
        nodes.push(node);
    }
}

fn unwrap_layer_blocks(nodes: &mut Vec<AstNode>) {
    for mut node in std::mem::take(nodes) {
        let layer = authored_layer(&node);
        if let AstNode::Rule(rule) = &mut node {
            unwrap_layer_blocks(&mut rule.nodes);
            if layer.is_some() {
                nodes.append(&mut rule.nodes);
                continue;
            }
        }
        nodes.push(node);
    }
}

/// Replaces each node whose path is in `plan` with the planned nodes.
fn splice(
    nodes: &mut Vec<AstNode>,
    path: &mut Vec<usize>,
    plan: &mut HashMap<Vec<usize>, Vec<AstNode>>,
) {
    if plan.is_empty() {
        return;
    }
    for (index, mut node) in std::mem::take(nodes).into_iter().enumerate() {
        path.push(index);
        if let Some(replacement) = plan.remove(path.as_slice()) {
            nodes.extend(replacement);
        } else {
            if let AstNode::Rule(rule) = &mut node {
                splice(&mut rule.nodes, path, plan);
            }
            nodes.push(node);
        }
        path.pop();
    }
}

fn warn_no_utilities(sink: &DiagnosticSink, span: Span) {
    let message = "No utility classes were detected in your source files.";
    let mut diag = Diagnostic::warning(DiagnosticCode::NO_UTILITIES, message, span)
        .with_help("check that `[content]` in tack.toml lists your template files");
    if !span.is_dummy() {
        diag = diag.with_label(Label::primary(span, "this layer is empty"));
    }
    if sink.emit_once(CONTENT_PROBLEMS, diag) {
        tracing::warn!("{message}");
    }
}
