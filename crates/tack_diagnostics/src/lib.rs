//! Diagnostics for the tack CSS compiler.
//!
//! Fatal stage errors (parse failures, misplaced directives, unreadable
//! content files) and non-fatal warnings (deprecated directives, empty
//! utility layers) are all reported as structured [`Diagnostic`]s. The
//! [`DiagnosticSink`] collects them during a compile pass, deduplicating
//! keyed warnings, and [`TerminalRenderer`] prints them rustc-style.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;
pub mod suggested_fix;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::Label;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
pub use suggested_fix::{Replacement, SuggestedFix};
