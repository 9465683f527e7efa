//! The directive normalizer.

use crate::error::DirectiveError;
use crate::registry::{ApplySite, DirectiveRegistry, CORE_LAYERS};
use tack_css::{walk_mut, AstNode};
use tack_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Label, SuggestedFix};
use tack_source::Span;

/// A block whose layer must be declared, recorded during the walk and
/// checked once every `@tailwind` directive has been seen.
struct GatedBlock {
    name: String,
    params: String,
    span: Span,
}

/// Records declared layers and `@apply` sites, rewrites legacy spellings,
/// and validates layer-targeting blocks.
///
/// `@tailwind screens` is rewritten to `@tailwind variants` in the tree.
/// Every `@responsive` / `@variants` block emits a deprecation warning once
/// per sink. Validation is skipped when `base`, `components` and `utilities`
/// are all declared; otherwise the first block targeting an undeclared layer
/// fails the pass.
pub fn normalize(
    ast: &mut [AstNode],
    sink: &DiagnosticSink,
) -> Result<DirectiveRegistry, DirectiveError> {
    let mut registry = DirectiveRegistry::default();
    let mut gated = Vec::new();

    walk_mut(ast, &mut |node| {
        let AstNode::Rule(rule) = node else {
            return;
        };
        let Some((name, params)) = rule.at_rule() else {
            return;
        };
        let span = rule.span.unwrap_or(Span::DUMMY);

        match name {
            "apply" => {
                let site = ApplySite::from_params(params, rule.span);
                registry.apply.push(site);
            }
            "tailwind" => {
                let mut layer = params.to_string();
                if layer == "screens" {
                    layer = "variants".to_string();
                    rule.selector = "@tailwind variants".to_string();
                }
                registry.tailwind.insert(layer);
            }
            "layer" | "responsive" | "variants" => {
                let name = name.to_string();
                let params = params.to_string();
                if name != "layer" {
                    warn_deprecated(sink, &name, params.is_empty(), span);
                }
                gated.push(GatedBlock { name, params, span });
            }
            _ => {}
        }
    });

    tracing::debug!(
        layers = ?registry.tailwind,
        apply_sites = registry.apply.len(),
        "directives collected"
    );

    if !registry.has_all_core_layers() {
        for block in &gated {
            check_block(&registry, block)?;
        }
    }

    Ok(registry)
}

fn check_block(registry: &DirectiveRegistry, block: &GatedBlock) -> Result<(), DirectiveError> {
    match block.name.as_str() {
        "layer" if CORE_LAYERS.contains(&block.params.as_str()) => {
            if !registry.has(&block.params) {
                return Err(DirectiveError::LayerWithoutDirective {
                    layer: block.params.clone(),
                    span: block.span,
                });
            }
        }
        "responsive" | "variants" => {
            if !registry.has("utilities") {
                return Err(DirectiveError::LegacyWithoutUtilities {
                    name: block.name.clone(),
                    span: block.span,
                });
            }
        }
        _ => {}
    }
    Ok(())
}

fn warn_deprecated(sink: &DiagnosticSink, name: &str, bare: bool, span: Span) {
    let mut diag = Diagnostic::warning(
        DiagnosticCode::DEPRECATED_AT_RULE,
        format!("The `@{name}` directive has been deprecated."),
        span,
    )
    .with_label(Label::primary(span, "deprecated at-rule"))
    .with_help("Use `@layer utilities` or `@layer components` instead.");

    // Only a parameterless head can be rewritten without losing meaning.
    if bare && !span.is_dummy() {
        let head = Span::new(span.file, span.start, span.start + 1 + name.len() as u32);
        diag = diag.with_fix(SuggestedFix::replace(
            "replace with `@layer utilities`",
            head,
            "@layer utilities",
        ));
    }

    if sink.emit_once(&format!("{name}-at-rule-deprecated"), diag) {
        tracing::warn!(at_rule = name, "deprecated at-rule");
    }
}
