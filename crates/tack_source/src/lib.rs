//! Source text management and location tracking for stylesheets.
//!
//! Every stylesheet parsed by tack is registered in a [`SourceDb`] and gets a
//! [`FileId`]. AST nodes carry [`Span`]s into that text; those spans are the
//! lineage a source-map emitter consumes, and [`ResolvedSpan`] turns them into
//! line/column coordinates for diagnostics.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
