//! The CSS syntax tree.

use serde::{Deserialize, Serialize};
use tack_source::Span;

/// A node of a parsed or generated stylesheet.
///
/// At-rules are [`Rule`]s whose selector starts with `@`. Statement at-rules
/// such as `@tailwind base;` have no block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AstNode {
    /// A qualified rule or an at-rule.
    Rule(Rule),
    /// A `property: value` pair.
    Declaration(Declaration),
    /// A hoisted license comment.
    Comment(Comment),
}

/// A selector (or at-rule prelude) with an ordered body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The trimmed selector, e.g. `.btn:hover` or `@media (min-width: 768px)`.
    pub selector: String,
    /// Children in source order.
    pub nodes: Vec<AstNode>,
    /// Whether the rule has a `{ }` block, even an empty one. `false` for
    /// statements ending in `;`.
    pub has_block: bool,
    /// Source location; `None` for generated nodes.
    pub span: Option<Span>,
}

/// A single declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// The property name, e.g. `color` or `--tw-ring-offset-width`.
    pub property: String,
    /// The value with `!important` stripped.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
    /// Source location; `None` for generated nodes.
    pub span: Option<Span>,
}

/// A comment kept in the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// The text between `/*` and `*/`, including the leading `!` of a
    /// license comment.
    pub text: String,
    /// Source location; `None` for generated nodes.
    pub span: Option<Span>,
}

impl AstNode {
    /// Creates a rule without a source location.
    pub fn rule(selector: impl Into<String>, nodes: Vec<AstNode>) -> Self {
        AstNode::Rule(Rule {
            selector: selector.into(),
            nodes,
            has_block: true,
            span: None,
        })
    }

    /// Creates a block-less at-rule such as `@tailwind base`.
    pub fn statement(prelude: impl Into<String>) -> Self {
        AstNode::Rule(Rule {
            selector: prelude.into(),
            nodes: Vec::new(),
            has_block: false,
            span: None,
        })
    }

    /// Creates a declaration without a source location.
    pub fn decl(property: impl Into<String>, value: impl Into<String>, important: bool) -> Self {
        AstNode::Declaration(Declaration {
            property: property.into(),
            value: value.into(),
            important,
            span: None,
        })
    }

    /// Creates a comment without a source location.
    pub fn comment(text: impl Into<String>) -> Self {
        AstNode::Comment(Comment {
            text: text.into(),
            span: None,
        })
    }

    /// Returns the node's source location, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            AstNode::Rule(r) => r.span,
            AstNode::Declaration(d) => d.span,
            AstNode::Comment(c) => c.span,
        }
    }

    fn span_mut(&mut self) -> &mut Option<Span> {
        match self {
            AstNode::Rule(r) => &mut r.span,
            AstNode::Declaration(d) => &mut d.span,
            AstNode::Comment(c) => &mut c.span,
        }
    }

    /// Returns the rule if this node is one.
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            AstNode::Rule(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the at-rule name and trimmed parameters if this node is an
    /// at-rule, e.g. `("tailwind", "base")` for `@tailwind base`.
    pub fn at_rule(&self) -> Option<(&str, &str)> {
        self.as_rule().and_then(Rule::at_rule)
    }

    /// Gives every node in this subtree without a span the given one.
    ///
    /// Nodes that already carry a location keep it.
    pub fn backfill_span(&mut self, span: Span) {
        let slot = self.span_mut();
        if slot.is_none() {
            *slot = Some(span);
        }
        if let AstNode::Rule(rule) = self {
            for child in &mut rule.nodes {
                child.backfill_span(span);
            }
        }
    }

    /// Removes the source location from every node in this subtree.
    pub fn clear_spans(&mut self) {
        *self.span_mut() = None;
        if let AstNode::Rule(rule) = self {
            for child in &mut rule.nodes {
                child.clear_spans();
            }
        }
    }
}

impl Rule {
    /// Returns `true` if the selector starts with `@`.
    pub fn is_at_rule(&self) -> bool {
        self.selector.starts_with('@')
    }

    /// Returns the at-rule name and trimmed parameters.
    pub fn at_rule(&self) -> Option<(&str, &str)> {
        let rest = self.selector.strip_prefix('@')?;
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '(')
            .unwrap_or(rest.len());
        Some((&rest[..end], rest[end..].trim()))
    }
}

/// Visits every node in pre-order with its nesting depth.
pub fn walk(nodes: &[AstNode], visit: &mut impl FnMut(&AstNode, usize)) {
    fn go(nodes: &[AstNode], depth: usize, visit: &mut impl FnMut(&AstNode, usize)) {
        for node in nodes {
            visit(node, depth);
            if let AstNode::Rule(rule) = node {
                go(&rule.nodes, depth + 1, visit);
            }
        }
    }
    go(nodes, 0, visit);
}

/// Visits every node in pre-order, allowing in-place edits.
///
/// Children are visited after the parent, so edits to a rule's `nodes` made
/// by the visitor are seen by the walk.
pub fn walk_mut(nodes: &mut [AstNode], visit: &mut impl FnMut(&mut AstNode)) {
    for node in nodes {
        visit(node);
        if let AstNode::Rule(rule) = node {
            walk_mut(&mut rule.nodes, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tack_source::FileId;

    #[test]
    fn at_rule_name_and_params() {
        let node = AstNode::statement("@tailwind base");
        assert_eq!(node.at_rule(), Some(("tailwind", "base")));

        let media = AstNode::rule("@media(min-width: 768px)", vec![]);
        assert_eq!(media.at_rule(), Some(("media", "(min-width: 768px)")));

        let bare = AstNode::statement("@responsive");
        assert_eq!(bare.at_rule(), Some(("responsive", "")));

        assert_eq!(AstNode::rule(".btn", vec![]).at_rule(), None);
        assert_eq!(AstNode::decl("color", "red", false).at_rule(), None);
    }

    #[test]
    fn backfill_only_fills_missing() {
        let kept = Span::new(FileId::from_raw(0), 1, 2);
        let fill = Span::new(FileId::from_raw(0), 10, 20);
        let mut node = AstNode::rule(
            ".a",
            vec![
                AstNode::decl("color", "red", false),
                AstNode::Declaration(Declaration {
                    property: "margin".into(),
                    value: "0".into(),
                    important: false,
                    span: Some(kept),
                }),
            ],
        );
        node.backfill_span(fill);

        assert_eq!(node.span(), Some(fill));
        let rule = node.as_rule().unwrap();
        assert_eq!(rule.nodes[0].span(), Some(fill));
        assert_eq!(rule.nodes[1].span(), Some(kept));
    }

    #[test]
    fn walk_reports_depth() {
        let tree = vec![AstNode::rule(
            "@media print",
            vec![AstNode::rule(".a", vec![AstNode::decl("color", "red", false)])],
        )];
        let mut seen = Vec::new();
        walk(&tree, &mut |node, depth| {
            let label = match node {
                AstNode::Rule(r) => r.selector.clone(),
                AstNode::Declaration(d) => d.property.clone(),
                AstNode::Comment(c) => c.text.clone(),
            };
            seen.push((label, depth));
        });
        assert_eq!(
            seen,
            vec![
                ("@media print".to_string(), 0),
                (".a".to_string(), 1),
                ("color".to_string(), 2),
            ]
        );
    }

    #[test]
    fn walk_mut_rewrites_nested() {
        let mut tree = vec![AstNode::rule(
            "@layer utilities",
            vec![AstNode::statement("@tailwind screens")],
        )];
        walk_mut(&mut tree, &mut |node| {
            if let AstNode::Rule(rule) = node {
                if rule.selector == "@tailwind screens" {
                    rule.selector = "@tailwind variants".to_string();
                }
            }
        });
        let inner = &tree[0].as_rule().unwrap().nodes[0];
        assert_eq!(inner.at_rule(), Some(("tailwind", "variants")));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&AstNode::decl("color", "red", true)).unwrap();
        assert!(json.contains("\"kind\":\"declaration\""));
        assert!(json.contains("\"important\":true"));
    }
}
