//! Single-pass CSS tokenizer.
//!
//! The scanner keeps an accumulation buffer (`current`) holding the text of
//! the node being read, a stack of open rules, and a stack of expected
//! closing braces. Each byte is dispatched in a fixed priority order:
//! escape, comment, string, whitespace run, custom property, `;`, `{`, `}`,
//! then plain text. Comments never reach the buffer; whitespace runs
//! collapse to a single space.

use crate::ast::{AstNode, Comment, Declaration, Rule};
use crate::error::ParseError;
use tack_source::{FileId, Span};

/// Parses stylesheet text into an ordered forest.
///
/// `source` is expected to have `\r\n` already normalized to `\n` (as
/// [`SourceFile`](tack_source::SourceFile) does), so every span indexes
/// straight into it. License comments (`/*! ... */`) are hoisted in
/// encounter order ahead of the top-level nodes.
pub fn parse(source: &str, file: FileId) -> Result<Vec<AstNode>, ParseError> {
    let parser = Parser {
        text: source,
        bytes: source.as_bytes(),
        pos: 0,
        file,
        ast: Vec::new(),
        licenses: Vec::new(),
        open: Vec::new(),
        closing: Vec::new(),
        current: String::new(),
        current_start: 0,
    };
    parser.run()
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    file: FileId,
    ast: Vec<AstNode>,
    licenses: Vec<AstNode>,
    /// Open rules, innermost last.
    open: Vec<Rule>,
    /// Expected closing braces of the main scan.
    closing: Vec<u8>,
    current: String,
    /// Byte offset where `current` began.
    current_start: usize,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t')
}

impl Parser<'_> {
    fn run(mut self) -> Result<Vec<AstNode>, ParseError> {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.escape(),
                b'/' if self.peek_at(self.pos + 1) == b'*' => self.comment(),
                quote @ (b'"' | b'\'') => self.string(quote)?,
                b' ' | b'\n' | b'\t' if is_whitespace(self.peek_at(self.pos + 1)) => {
                    self.pos += 1;
                }
                b'\n' => {
                    if self
                        .current
                        .bytes()
                        .last()
                        .is_some_and(|last| !is_whitespace(last))
                    {
                        self.current.push(' ');
                    }
                    self.pos += 1;
                }
                b'-' if self.peek_at(self.pos + 1) == b'-' && self.current.is_empty() => {
                    self.custom_property();
                }
                b';' => self.semicolon(),
                b'{' => self.open_block(),
                b'}' => self.close_block()?,
                _ => self.plain(),
            }
        }

        if !self.closing.is_empty() {
            if let Some(rule) = self.open.last() {
                return Err(ParseError::MissingClosingBrace {
                    selector: rule.selector.clone(),
                    span: rule.span.unwrap_or(Span::DUMMY),
                });
            }
        }

        let mut out = self.licenses;
        out.append(&mut self.ast);
        Ok(out)
    }

    fn peek_at(&self, idx: usize) -> u8 {
        self.bytes.get(idx).copied().unwrap_or(0)
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::from_range(self.file, start, end)
    }

    /// Appends `text[start..end]` to the buffer, recording where it began.
    fn append(&mut self, start: usize, end: usize) {
        if self.current.is_empty() {
            self.current_start = start;
        }
        self.current.push_str(&self.text[start..end]);
    }

    fn take_current(&mut self) -> (String, usize) {
        (std::mem::take(&mut self.current), self.current_start)
    }

    fn attach(&mut self, node: AstNode) {
        match self.open.last_mut() {
            Some(parent) => parent.nodes.push(node),
            None => self.ast.push(node),
        }
    }

    /// `\` and the character after it are copied verbatim.
    fn escape(&mut self) {
        let start = self.pos;
        let mut end = start + 1;
        if let Some(c) = self.text[end..].chars().next() {
            end += c.len_utf8();
        }
        self.append(start, end);
        self.pos = end;
    }

    /// Skips a comment, keeping `/*! ... */` for hoisting. An unclosed
    /// comment runs to the end of input.
    fn comment(&mut self) {
        let start = self.pos;
        let len = self.bytes.len();
        let mut j = start + 2;
        let mut inner_end = len;
        let mut end = len;
        while j < len {
            match self.bytes[j] {
                b'\\' => j += 2,
                b'*' if self.peek_at(j + 1) == b'/' => {
                    inner_end = j;
                    end = j + 2;
                    break;
                }
                _ => j += 1,
            }
        }

        if self.peek_at(start + 2) == b'!' {
            self.licenses.push(AstNode::Comment(Comment {
                text: self.text[start + 2..inner_end].to_string(),
                span: Some(self.span(start, end)),
            }));
        }
        self.pos = end;
    }

    fn string(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.pos;
        let len = self.bytes.len();
        let mut j = start + 1;
        loop {
            if j >= len {
                return Err(self.unterminated(start, len, len));
            }
            match self.bytes[j] {
                b'\\' => j += 2,
                b if b == quote => break,
                b';' if self.peek_at(j + 1) == b'\n' => {
                    return Err(self.unterminated(start, j + 1, j + 1));
                }
                b'\n' => return Err(self.unterminated(start, j, j)),
                _ => j += 1,
            }
        }
        self.append(start, j + 1);
        self.pos = j + 1;
        Ok(())
    }

    fn unterminated(&self, start: usize, literal_end: usize, span_end: usize) -> ParseError {
        let quote = self.bytes[start] as char;
        ParseError::UnterminatedString {
            literal: format!("{}{quote}", &self.text[start..literal_end]),
            span: self.span(start, span_end),
        }
    }

    /// Reads `--name: value` with its own bracket stack, so `;` and `}`
    /// nested in `()`, `[]` or `{}` belong to the value. Ends at a
    /// top-level `;` (consumed), a top-level `}` (left for the main scan),
    /// or the end of input.
    fn custom_property(&mut self) {
        let start = self.pos;
        let len = self.bytes.len();
        let mut brackets: Vec<u8> = Vec::new();
        let mut colon: Option<usize> = None;
        let mut end = len;
        let mut resume = len;
        let mut j = start + 2;

        while j < len {
            match self.bytes[j] {
                b'\\' => {
                    j += 2;
                    continue;
                }
                b'/' if self.peek_at(j + 1) == b'*' => {
                    let mut k = j + 2;
                    while k < len {
                        match self.bytes[k] {
                            b'\\' => k += 2,
                            b'*' if self.peek_at(k + 1) == b'/' => {
                                k += 1;
                                break;
                            }
                            _ => k += 1,
                        }
                    }
                    j = k + 1;
                    continue;
                }
                b':' if colon.is_none() => colon = Some(j - start),
                b';' if brackets.is_empty() => {
                    end = j;
                    resume = j + 1;
                    break;
                }
                b'(' => brackets.push(b')'),
                b'[' => brackets.push(b']'),
                b'{' => brackets.push(b'}'),
                b'}' if brackets.is_empty() => {
                    end = j;
                    resume = j;
                    break;
                }
                close @ (b')' | b']' | b'}') => {
                    if brackets.last() == Some(&close) {
                        brackets.pop();
                    }
                }
                _ => {}
            }
            j += 1;
        }

        let end = end.min(len);
        let raw = &self.text[start..end];
        let span = self.span(start, resume.min(len));
        let declaration = split_declaration(raw, colon, span);
        self.attach(declaration);
        self.current.clear();
        self.pos = resume.min(len);
    }

    /// `;` ends a body-less at-rule or a declaration.
    fn semicolon(&mut self) {
        let (current, start) = self.take_current();
        self.pos += 1;
        if current.starts_with('@') {
            let rule = Rule {
                selector: current.trim_end().to_string(),
                nodes: Vec::new(),
                has_block: false,
                span: Some(self.span(start, self.pos)),
            };
            self.attach(AstNode::Rule(rule));
        } else if !current.trim().is_empty() {
            let span = self.span(start, self.pos);
            self.attach(split_declaration(&current, None, span));
        }
    }

    fn open_block(&mut self) {
        let (current, start) = self.take_current();
        let start = if current.is_empty() { self.pos } else { start };
        self.pos += 1;
        self.closing.push(b'}');
        self.open.push(Rule {
            selector: current.trim().to_string(),
            nodes: Vec::new(),
            has_block: true,
            span: Some(self.span(start, self.pos)),
        });
    }

    fn close_block(&mut self) -> Result<(), ParseError> {
        if self.closing.pop().is_none() {
            return Err(ParseError::MissingOpeningBrace {
                span: self.span(self.pos, self.pos + 1),
            });
        }

        let (current, start) = self.take_current();
        if !current.is_empty() {
            let span = self.span(start, self.pos);
            if current.starts_with('@') {
                self.attach(AstNode::Rule(Rule {
                    selector: current.trim().to_string(),
                    nodes: Vec::new(),
                    has_block: false,
                    span: Some(span),
                }));
            } else if let Some(parent) = self.open.last_mut() {
                // An unterminated declaration is kept only inside a rule;
                // at the top level it is dropped.
                parent.nodes.push(split_declaration(&current, None, span));
            }
        }

        self.pos += 1;
        if let Some(mut rule) = self.open.pop() {
            if let Some(span) = rule.span.as_mut() {
                span.end = self.pos as u32;
            }
            self.attach(AstNode::Rule(rule));
        }
        Ok(())
    }

    /// Any other character joins the buffer; leading whitespace of a fresh
    /// node is dropped.
    fn plain(&mut self) {
        let start = self.pos;
        if self.current.is_empty() && is_whitespace(self.bytes[start]) {
            self.pos += 1;
            return;
        }
        let width = self.text[start..].chars().next().map_or(1, char::len_utf8);
        self.append(start, start + width);
        self.pos = start + width;
    }
}

/// Splits `text` at `colon` (or its first `:`) into a declaration.
///
/// `!important` anywhere after the colon is stripped and sets the flag.
/// Text with no colon becomes a property with an empty value.
fn split_declaration(text: &str, colon: Option<usize>, span: Span) -> AstNode {
    let colon = colon.or_else(|| text.find(':'));
    let (property, value, important) = match colon {
        Some(idx) => {
            let rest = &text[idx + 1..];
            match rest.find("!important") {
                Some(bang) => (&text[..idx], &rest[..bang], true),
                None => (&text[..idx], rest, false),
            }
        }
        None => (text, "", false),
    };
    AstNode::Declaration(Declaration {
        property: property.trim().to_string(),
        value: value.trim().to_string(),
        important,
        span: Some(span),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> FileId {
        FileId::from_raw(0)
    }

    fn parse_ok(source: &str) -> Vec<AstNode> {
        let mut nodes = parse(source, file()).unwrap();
        for node in &mut nodes {
            node.clear_spans();
        }
        nodes
    }

    fn rule<'a>(node: &'a AstNode) -> &'a Rule {
        node.as_rule().expect("expected a rule")
    }

    fn decl(node: &AstNode) -> &Declaration {
        match node {
            AstNode::Declaration(d) => d,
            other => panic!("expected a declaration, got {other:?}"),
        }
    }

    #[test]
    fn single_rule_round_trip() {
        let ast = parse_ok(".foo {\n  color:   red  ;\n}");
        assert_eq!(
            ast,
            vec![AstNode::rule(
                ".foo",
                vec![AstNode::decl("color", "red", false)]
            )]
        );
    }

    #[test]
    fn nested_rules_keep_order() {
        let ast = parse_ok("@media print { .a { color: red; } .b { color: blue } }");
        let media = rule(&ast[0]);
        assert_eq!(media.selector, "@media print");
        assert_eq!(media.nodes.len(), 2);
        assert_eq!(rule(&media.nodes[0]).selector, ".a");
        assert_eq!(rule(&media.nodes[1]).selector, ".b");
        assert_eq!(decl(&rule(&media.nodes[1]).nodes[0]).value, "blue");
    }

    #[test]
    fn important_is_stripped() {
        let ast = parse_ok(".a { color: red !important; margin: 0 !important }");
        let body = &rule(&ast[0]).nodes;
        assert_eq!(body[0], AstNode::decl("color", "red", true));
        assert_eq!(body[1], AstNode::decl("margin", "0", true));
    }

    #[test]
    fn bodyless_at_rules() {
        let ast = parse_ok("@tailwind base;\n@tailwind utilities;");
        assert_eq!(ast.len(), 2);
        assert_eq!(ast[0].at_rule(), Some(("tailwind", "base")));
        assert_eq!(ast[1].at_rule(), Some(("tailwind", "utilities")));
        assert!(rule(&ast[0]).nodes.is_empty());
        assert!(!rule(&ast[0]).has_block);
    }

    #[test]
    fn at_rule_closed_by_brace() {
        let ast = parse_ok("@layer utilities { @tailwind utilities }");
        let layer = rule(&ast[0]);
        assert_eq!(layer.nodes, vec![AstNode::statement("@tailwind utilities")]);
    }

    #[test]
    fn custom_property_with_nested_braces() {
        let ast = parse_ok(".a { --x: calc(1px + var(--y, {nested})); color: red; }");
        let body = &rule(&ast[0]).nodes;
        assert_eq!(body.len(), 2);
        let custom = decl(&body[0]);
        assert_eq!(custom.property, "--x");
        assert_eq!(custom.value, "calc(1px + var(--y, {nested}))");
        assert!(custom.value.contains("{nested}"));
        assert_eq!(decl(&body[1]).property, "color");
    }

    #[test]
    fn custom_property_keeps_semicolon_inside_brackets() {
        let ast = parse_ok(".a { --list: [a;b]; }");
        assert_eq!(decl(&rule(&ast[0]).nodes[0]).value, "[a;b]");
    }

    #[test]
    fn custom_property_ended_by_brace() {
        let ast = parse_ok(".a{--x: 1}.b{color:red}");
        assert_eq!(ast.len(), 2);
        assert_eq!(rule(&ast[0]).nodes, vec![AstNode::decl("--x", "1", false)]);
        assert_eq!(rule(&ast[1]).selector, ".b");
    }

    #[test]
    fn custom_property_at_end_of_input() {
        let ast = parse_ok("--brand: #fff");
        assert_eq!(ast, vec![AstNode::decl("--brand", "#fff", false)]);
    }

    #[test]
    fn custom_property_keeps_comments_verbatim() {
        let ast = parse_ok(".a { --x: a /* ; } */ b; }");
        assert_eq!(decl(&rule(&ast[0]).nodes[0]).value, "a /* ; } */ b");
    }

    #[test]
    fn unterminated_string_on_newline() {
        let err = parse(".a{content:\"oops}\n", file()).unwrap_err();
        match err {
            ParseError::UnterminatedString { literal, span } => {
                assert_eq!(literal, "\"oops}\"");
                assert_eq!(span.start, 11);
            }
            other => panic!("expected unterminated string, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_string_on_semicolon_newline() {
        let err = parse(".a { content: 'abc;\n}", file()).unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { .. }));
    }

    #[test]
    fn strings_keep_other_quotes_and_braces() {
        let ast = parse_ok(".a { content: \"it's {ok}; fine\"; }");
        assert_eq!(decl(&rule(&ast[0]).nodes[0]).value, "\"it's {ok}; fine\"");
    }

    #[test]
    fn missing_opening_brace() {
        let err = parse(".a { color: red; } }", file()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingOpeningBrace {
                span: Span::new(file(), 19, 20)
            }
        );
    }

    #[test]
    fn missing_closing_brace_names_selector() {
        let err = parse(".outer { .inner { color: red; }", file()).unwrap_err();
        match err {
            ParseError::MissingClosingBrace { selector, span } => {
                assert_eq!(selector, ".outer");
                assert_eq!(span.start, 0);
            }
            other => panic!("expected missing closing brace, got {other:?}"),
        }
    }

    #[test]
    fn license_comments_are_hoisted() {
        let ast = parse_ok(".a { color: red; }\n/*! MIT */\n/* dropped */\n.b { color: blue; }");
        assert_eq!(ast.len(), 3);
        assert_eq!(ast[0], AstNode::comment("! MIT "));
        assert_eq!(rule(&ast[1]).selector, ".a");
        assert_eq!(rule(&ast[2]).selector, ".b");
    }

    #[test]
    fn comments_never_enter_values() {
        let ast = parse_ok(".a { color: /* note */ red; }");
        assert_eq!(decl(&rule(&ast[0]).nodes[0]).value, "red");
    }

    #[test]
    fn escapes_are_verbatim() {
        let ast = parse_ok(".hover\\:bg-red:hover { color: red; }");
        assert_eq!(rule(&ast[0]).selector, ".hover\\:bg-red:hover");
    }

    #[test]
    fn whitespace_collapses_in_selectors() {
        let ast = parse_ok(".a,\n.b\n\n  .c {}");
        assert_eq!(rule(&ast[0]).selector, ".a, .b .c");
    }

    #[test]
    fn dangling_top_level_declaration_is_dropped() {
        let ast = parse_ok(".a { color: red }");
        assert_eq!(rule(&ast[0]).nodes.len(), 1);
        let ast = parse_ok("color: red");
        assert!(ast.is_empty());
    }

    #[test]
    fn spans_cover_source_text() {
        let source = ".a { color: red; }";
        let ast = parse(source, file()).unwrap();
        let rule_span = ast[0].span().unwrap();
        assert_eq!((rule_span.start, rule_span.end), (0, source.len() as u32));
        let decl_span = rule(&ast[0]).nodes[0].span().unwrap();
        assert_eq!(&source[decl_span.start as usize..decl_span.end as usize], "color: red;");
    }

    #[test]
    fn multibyte_text_is_preserved() {
        let ast = parse_ok(".a::after { content: \"→\"; font-family: Ünïcode; }");
        let body = &rule(&ast[0]).nodes;
        assert_eq!(decl(&body[0]).value, "\"→\"");
        assert_eq!(decl(&body[1]).value, "Ünïcode");
    }
}
