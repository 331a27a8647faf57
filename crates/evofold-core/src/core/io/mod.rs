//! Error reporting shared by the file loaders.
//!
//! The folding core only consumes in-memory energy tables, decoy sets and
//! settings. Loading them from disk is a convenience layer, and every loader
//! reports failures through [`error::LoadError`] with the offending path attached.

pub mod error;
