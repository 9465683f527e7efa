//! The default candidate extractor.
//!
//! A line is split on characters that cannot appear in a class name, except
//! inside `[...]` or `(...)` where arbitrary values may contain anything. The
//! pieces are then filtered down to plausible class tokens.

use tack_common::Candidate;

/// Extracts candidate tokens from one line of content.
///
/// ```
/// use tack_extract::extract_candidates;
///
/// let found = extract_candidates(r#"<div class="p-4 md:hover:bg-[#fff]">"#);
/// let found: Vec<_> = found.iter().map(|c| c.as_str()).collect();
/// assert!(found.contains(&"p-4"));
/// assert!(found.contains(&"md:hover:bg-[#fff]"));
/// ```
pub fn extract_candidates(line: &str) -> Vec<Candidate> {
    split_tokens(line)
        .into_iter()
        .filter(|token| is_valid_candidate(token))
        .map(Candidate::new)
        .collect()
}

fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth: usize = 0;
    let mut paren_depth: usize = 0;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                current.push(next);
            }
            continue;
        }

        match ch {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ => {}
        }

        if bracket_depth == 0 && paren_depth == 0 && is_delimiter(ch) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            '"' | '\'' | '`' | '<' | '>' | '=' | '{' | '}' | ';' | ','
        )
}

/// Returns `true` if `token` could name a utility: only class-safe
/// characters, at least one letter or `[`, and no trailing `:`.
pub fn is_valid_candidate(token: &str) -> bool {
    if token.is_empty() || token.ends_with(':') {
        return false;
    }
    let mut has_letter_or_bracket = false;
    for ch in token.chars() {
        if ch.is_ascii_alphabetic() || ch == '[' {
            has_letter_or_bracket = true;
        }
        if !is_allowed_char(ch) {
            return false;
        }
    }
    has_letter_or_bracket
}

fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '-' | '_'
                | '/'
                | ':'
                | '.'
                | ','
                | '%'
                | '#'
                | '['
                | ']'
                | '('
                | ')'
                | '!'
                | '&'
                | '>'
                | '+'
                | '*'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        extract_candidates(line)
            .into_iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }

    #[test]
    fn extracts_from_class_attribute() {
        let found = tokens(r#"<div class="flex items-center p-4">"#);
        assert!(found.contains(&"flex".to_string()));
        assert!(found.contains(&"items-center".to_string()));
        assert!(found.contains(&"p-4".to_string()));
        assert!(found.contains(&"class".to_string()));
    }

    #[test]
    fn keeps_arbitrary_values_intact() {
        let found = tokens("<div class='grid-cols-[1fr,2fr] bg-[url(a.png)] w-[calc(100%_-_1rem)]'>");
        assert!(found.contains(&"grid-cols-[1fr,2fr]".to_string()));
        assert!(found.contains(&"bg-[url(a.png)]".to_string()));
        assert!(found.contains(&"w-[calc(100%_-_1rem)]".to_string()));
    }

    #[test]
    fn keeps_variants_and_important() {
        let found = tokens("md:hover:text-red-500 !font-bold [&>*]:p-2");
        assert_eq!(found, vec!["md:hover:text-red-500", "!font-bold", "[&>*]:p-2"]);
    }

    #[test]
    fn rejects_numbers_and_punctuation() {
        assert!(tokens("42 3.14 :: -- @@").is_empty());
        assert!(!is_valid_candidate("hover:"));
        assert!(!is_valid_candidate("a$b"));
    }

    #[test]
    fn escapes_are_unescaped() {
        assert_eq!(tokens(r".md\:p-4"), vec![".md:p-4"]);
    }
}
