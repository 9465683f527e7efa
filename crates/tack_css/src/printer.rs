//! Serialization of the syntax tree back to CSS text.

use crate::ast::{AstNode, Declaration};

/// Output layout for [`print`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrintStyle {
    /// One node per line, two-space indentation.
    #[default]
    Pretty,
    /// No optional whitespace.
    Minified,
}

/// Prints a forest of nodes as CSS.
///
/// Rules without a block print as statements (`@tailwind base;`); an
/// empty block prints as `{}`.
pub fn print(nodes: &[AstNode], style: PrintStyle) -> String {
    let mut out = String::new();
    for node in nodes {
        print_node(node, style, 0, &mut out);
    }
    out
}

fn print_node(node: &AstNode, style: PrintStyle, depth: usize, out: &mut String) {
    let pretty = style == PrintStyle::Pretty;
    let indent = if pretty { "  ".repeat(depth) } else { String::new() };

    match node {
        AstNode::Comment(comment) => {
            out.push_str(&indent);
            out.push_str("/*");
            out.push_str(&comment.text);
            out.push_str("*/");
            if pretty {
                out.push('\n');
            }
        }
        AstNode::Declaration(decl) => {
            out.push_str(&indent);
            push_declaration(decl, pretty, out);
            if pretty {
                out.push('\n');
            }
        }
        AstNode::Rule(rule) => {
            out.push_str(&indent);
            out.push_str(&rule.selector);
            if !rule.has_block {
                out.push(';');
                if pretty {
                    out.push('\n');
                }
                return;
            }
            if pretty {
                out.push_str(" {\n");
            } else {
                out.push('{');
            }
            for child in &rule.nodes {
                print_node(child, style, depth + 1, out);
            }
            if !pretty && out.ends_with(';') {
                out.pop();
            }
            out.push_str(&indent);
            out.push('}');
            if pretty {
                out.push('\n');
            }
        }
    }
}

fn push_declaration(decl: &Declaration, pretty: bool, out: &mut String) {
    out.push_str(&decl.property);
    out.push(':');
    if pretty {
        out.push(' ');
    }
    out.push_str(&decl.value);
    if decl.important {
        out.push_str(if pretty { " !important" } else { "!important" });
    }
    out.push(';');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use tack_source::FileId;

    fn sample() -> Vec<AstNode> {
        vec![
            AstNode::comment("! MIT "),
            AstNode::statement("@tailwind base"),
            AstNode::rule(
                "@media (min-width: 768px)",
                vec![AstNode::rule(
                    ".md\\:p-4",
                    vec![
                        AstNode::decl("padding", "1rem", false),
                        AstNode::decl("color", "red", true),
                    ],
                )],
            ),
        ]
    }

    #[test]
    fn pretty_output() {
        let css = print(&sample(), PrintStyle::Pretty);
        assert_eq!(
            css,
            "/*! MIT */\n\
             @tailwind base;\n\
             @media (min-width: 768px) {\n  \
             .md\\:p-4 {\n    \
             padding: 1rem;\n    \
             color: red !important;\n  \
             }\n\
             }\n"
        );
    }

    #[test]
    fn minified_output() {
        let css = print(&sample(), PrintStyle::Minified);
        assert_eq!(
            css,
            "/*! MIT */@tailwind base;@media (min-width: 768px){.md\\:p-4{padding:1rem;color:red!important}}"
        );
    }

    #[test]
    fn reparse_of_printed_output_is_stable() {
        let source = ".a { color: red; --x: var(--y, {z}); }\n@media print { .b { margin: 0 !important; } }";
        let mut first = parse(source, FileId::from_raw(0)).unwrap();
        first.iter_mut().for_each(AstNode::clear_spans);
        let printed = print(&first, PrintStyle::Pretty);
        let mut second = parse(&printed, FileId::from_raw(0)).unwrap();
        second.iter_mut().for_each(AstNode::clear_spans);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_blocks_stay_blocks() {
        let source = "@media print {}\n@font-face {}\n@charset \"UTF-8\";";
        let mut first = parse(source, FileId::from_raw(0)).unwrap();
        first.iter_mut().for_each(AstNode::clear_spans);
        let printed = print(&first, PrintStyle::Minified);
        assert_eq!(printed, "@media print{}@font-face{}@charset \"UTF-8\";");
        let mut second = parse(&printed, FileId::from_raw(0)).unwrap();
        second.iter_mut().for_each(AstNode::clear_spans);
        assert_eq!(first, second);
    }
}
