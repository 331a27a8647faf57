//! # Energy Module
//!
//! The contact energy model: a symmetric table of pair energies between monomer
//! types ([`table`]) and the scoring of a sequence threaded onto a conformation's
//! contact set ([`contact`]).
//!
//! Scoring is linear in the number of contacts and allocates nothing.

pub mod contact;
pub mod table;
