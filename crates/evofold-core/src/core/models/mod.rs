//! # Core Models Module
//!
//! Data structures describing what gets folded and what it folds into.
//!
//! - [`sequence`] - Monomer codes and immutable chains, with amino-acid letter parsing
//! - [`conformation`] - Contacts, lattice embeddings and ordered conformation sets
//! - [`ids`] - Structure identifiers
//!
//! Conformations are immutable once built. Sets of them are shared between
//! folds behind an `Arc`, so a fold never copies structural data.

pub mod conformation;
pub mod ids;
pub mod sequence;
