//! # Engine Module
//!
//! Stateful machinery behind a fold: configuration, the shared conformation
//! cache and the thermodynamic reduction of energies to a stability score.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - `FolderConfig`, its builder and the TOML settings file
//! - **Conformation Library** ([`library`]) - Per-length, initialize-once cache of
//!   compact conformations produced by exhaustive walk enumeration
//! - **Stability** ([`stability`]) - Native selection, Boltzmann probability and
//!   folding free energy
//! - **Error Handling** ([`error`]) - `FoldError` and `CapacityError`
//!
//! Enumeration itself is crate-private; callers reach it through
//! [`library::ConformationLibrary::conformations_for`].

pub mod config;
pub(crate) mod enumeration;
pub mod error;
pub mod library;
pub mod stability;
