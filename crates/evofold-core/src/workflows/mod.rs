//! # Workflows Module
//!
//! User-facing folding entry points built on the [`crate::engine`] layer.
//!
//! - **Folding** ([`fold`]) - The [`fold::Fold`] trait, the exact
//!   [`fold::LatticeFolder`], `build_folder` and `fold_batch`
//! - **Decoy Folding** ([`decoy`]) - [`decoy::DecoyFolder`], bound to a fixed decoy set
//! - **Neutrality** ([`neutrality`]) - Robustness of a native structure to point mutations

pub mod decoy;
pub mod fold;
pub mod neutrality;
