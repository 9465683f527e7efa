//! Shared foundational types used across the tack CSS compiler.
//!
//! This crate provides the [`Candidate`] token type shared by the extractor and
//! the rule generator, content hashing for change detection, and the error
//! type used for internal invariant violations.

#![warn(missing_docs)]

pub mod candidate;
pub mod hash;
pub mod result;

pub use candidate::{Candidate, CONTINUE_SENTINEL, NOT_ON_DEMAND};
pub use hash::ContentHash;
pub use result::InternalError;
