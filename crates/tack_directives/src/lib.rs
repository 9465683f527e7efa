//! Validation and normalization of `@tailwind` and related directives.
//!
//! [`normalize`] walks a parsed stylesheet once, rewrites legacy spellings in
//! place, records which `@tailwind` layers and `@apply` sites are present,
//! and rejects `@layer` / `@responsive` / `@variants` blocks whose layer was
//! never declared.

#![warn(missing_docs)]

pub mod error;
pub mod normalize;
pub mod registry;

pub use error::DirectiveError;
pub use normalize::normalize;
pub use registry::{ApplySite, DirectiveRegistry};
