//! # Core Module
//!
//! Stateless building blocks of the lattice folding model.
//!
//! ## Architecture
//!
//! - **Lattice Geometry** ([`lattice`]) - Square and cubic lattices, compact box shapes
//!   and their symmetry groups
//! - **Models** ([`models`]) - Monomer sequences, contacts, conformations and
//!   conformation sets
//! - **Contact Energies** ([`energy`]) - Pairwise energy tables and contact scoring
//! - **Decoy Sets** ([`decoys`]) - Externally supplied contact maps for long chains
//! - **File I/O** ([`io`]) - Errors shared by the file loaders
//!
//! Nothing in this layer caches or mutates shared state; the [`crate::engine`]
//! layer owns the conformation cache and the thermodynamic reduction.

pub mod decoys;
pub mod energy;
pub mod io;
pub mod lattice;
pub mod models;
