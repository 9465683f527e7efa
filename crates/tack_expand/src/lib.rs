//! The `@tailwind` expansion pass and the end-to-end compile pipeline.
//!
//! [`expand`] scans changed content, feeds the candidates through the rule
//! generator and splices the resulting layer buckets into the document in
//! place of its `@tailwind` directives. [`compile`] runs the whole chain for
//! one stylesheet: parse, normalize directives, expand.
//!
//! Every cache that makes rebuilds cheap lives in a caller-owned
//! [`Session`].

#![warn(missing_docs)]

pub mod compile;
pub mod error;
pub mod expand;
pub mod merge;
pub mod session;

pub use compile::{compile, Pipeline};
pub use error::CompileError;
pub use expand::{expand, ExpandOptions};
pub use merge::{find_directives, merge, DirectiveSite, Directives};
pub use session::Session;
