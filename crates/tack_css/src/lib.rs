//! CSS syntax tree, tokenizer and printer.
//!
//! [`parse`] turns stylesheet text into an ordered forest of [`AstNode`]s in
//! a single left-to-right scan. It is deliberately permissive: it does not
//! validate property values or selectors, it only recovers structure, keeps
//! custom-property values verbatim, and hoists `/*! ... */` license comments
//! to the front of the document. [`print`] serializes a forest back to CSS.

#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod parser;
pub mod printer;

pub use ast::{walk, walk_mut, AstNode, Comment, Declaration, Rule};
pub use error::ParseError;
pub use parser::parse;
pub use printer::{print, PrintStyle};
