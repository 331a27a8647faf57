//! # Lattice Module
//!
//! Geometry of the square (2D) and simple cubic (3D) lattices on which chains are
//! embedded, together with the compact box shapes that a chain of a given length
//! fills completely.
//!
//! - [`geometry`] - Sites, unit offsets and the adjacency predicate
//! - [`shape`] - Compact boxes, linear site indexing and box symmetries

pub mod geometry;
pub mod shape;
