//! Candidate extraction from template content.
//!
//! Content arrives as [`ChangedContent`] items: inline text, or files whose
//! extension selects a [`ContentHandler`]. Each handler transforms the text
//! and splits it into candidate tokens line by line. Results are memoized per
//! extractor and line in bounded [`LineCaches`]; file reads run concurrently
//! in bounded batches. See [`scan`].

#![warn(missing_docs)]

pub mod cache;
pub mod content;
pub mod error;
pub mod extractor;
pub mod handler;
pub mod scan;
pub mod tracker;

pub use cache::LineCaches;
pub use content::ChangedContent;
pub use error::ExtractError;
pub use extractor::{extract_candidates, is_valid_candidate};
pub use handler::{ContentHandler, DefaultHandler, HandlerRegistry, SvelteHandler};
pub use scan::{scan, ExtractorState};
pub use tracker::ChangeTracker;
