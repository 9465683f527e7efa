//! Rule generation and the session rule cache.
//!
//! A [`RuleResolver`] turns each candidate into zero or more [`Fragment`]s,
//! each tagged with the [`Layer`] it belongs to. [`generate`] classifies
//! every candidate at most once per [`RuleCache`] and re-partitions the
//! cache into a [`Stylesheet`] of five layer buckets only when it grew.

#![warn(missing_docs)]

pub mod cache;
pub mod config_resolver;
pub mod escape;
pub mod fragment;
pub mod generate;
pub mod layer;
pub mod resolver;
pub mod stylesheet;

pub use cache::{Classification, RuleCache};
pub use config_resolver::{ConfigResolver, ResolverError};
pub use escape::escape_class_name;
pub use fragment::Fragment;
pub use generate::generate;
pub use layer::Layer;
pub use resolver::RuleResolver;
pub use stylesheet::Stylesheet;
