//! Diagnostic codes with category prefixes.
//!
//! Numbering by stage: `0xx` configuration and internal errors, `1xx`
//! tokenizer, `2xx` directives, `3xx` content scanning and generation,
//! `4xx` deprecations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Fatal problems, prefixed with `E`.
    Error,
    /// Suspicious but non-fatal input, prefixed with `W`.
    Warning,
    /// Use of deprecated syntax, prefixed with `D`.
    Deprecation,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Deprecation => 'D',
        }
    }
}

/// A category prefix plus a zero-padded three-digit number, e.g. `E101`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// An invariant of the compiler itself was violated.
    pub const INTERNAL: Self = Self::new(Category::Error, 0);
    /// `tack.toml` could not be loaded or failed validation.
    pub const INVALID_CONFIG: Self = Self::new(Category::Error, 1);
    /// A declaration body in `tack.toml` does not parse.
    pub const INVALID_RULE_BODY: Self = Self::new(Category::Error, 2);
    /// Unterminated string literal.
    pub const UNTERMINATED_STRING: Self = Self::new(Category::Error, 101);
    /// `}` with no open block.
    pub const MISSING_OPENING_BRACE: Self = Self::new(Category::Error, 102);
    /// Block still open at end of input.
    pub const MISSING_CLOSING_BRACE: Self = Self::new(Category::Error, 103);
    /// `@layer` without its `@tailwind` directive.
    pub const LAYER_WITHOUT_DIRECTIVE: Self = Self::new(Category::Error, 201);
    /// `@responsive` or `@variants` without `@tailwind utilities`.
    pub const LEGACY_WITHOUT_UTILITIES: Self = Self::new(Category::Error, 202);
    /// A content file could not be read.
    pub const CONTENT_UNREADABLE: Self = Self::new(Category::Error, 301);
    /// `@tailwind utilities` produced no rules.
    pub const NO_UTILITIES: Self = Self::new(Category::Warning, 301);
    /// Legacy `@responsive` / `@variants` at-rule.
    pub const DEPRECATED_AT_RULE: Self = Self::new(Category::Deprecation, 401);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefixes() {
        assert_eq!(Category::Error.prefix(), 'E');
        assert_eq!(Category::Warning.prefix(), 'W');
        assert_eq!(Category::Deprecation.prefix(), 'D');
    }

    #[test]
    fn display_format() {
        assert_eq!(DiagnosticCode::UNTERMINATED_STRING.to_string(), "E101");
        assert_eq!(DiagnosticCode::NO_UTILITIES.to_string(), "W301");
        assert_eq!(DiagnosticCode::new(Category::Deprecation, 7).to_string(), "D007");
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::LAYER_WITHOUT_DIRECTIVE;
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
