//! # evofold
//!
//! Exact and decoy-based folding of lattice proteins: a sequence of monomer
//! types is scored on every maximally compact self-avoiding walk of its length,
//! and the lowest-energy walk is reported together with its Boltzmann
//! probability and folding free energy.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the three-layer split of its sibling projects.
//!
//! - **[`core`]: The Foundation.** Stateless models: lattice geometry, compact
//!   box shapes, sequences, contacts, conformations, contact energy tables and
//!   decoy sets, plus their file loaders.
//!
//! - **[`engine`]: The Logic Core.** Folder configuration, the per-length
//!   conformation cache with its exhaustive enumeration, and the reduction of
//!   energies to stability and free energy.
//!
//! - **[`workflows`]: The Public API.** The `Fold` trait with the exact and
//!   decoy folders, batch folding and neutrality analysis.
//!
//! ## Example
//!
//! ```
//! use evofold::core::energy::table::EnergyTable;
//! use evofold::core::models::sequence::Sequence;
//! use evofold::engine::config::FolderConfig;
//! use evofold::workflows::fold::{Fold, LatticeFolder};
//!
//! let table = EnergyTable::from_matrix(&[vec![-1.0, 0.0], vec![0.0, 0.0]])?;
//! let config = FolderConfig::builder()
//!     .dimensionality(2)
//!     .max_length(16)
//!     .energy_table(table)
//!     .temperature(1.0)
//!     .build()?;
//! let folder = LatticeFolder::new(config)?;
//!
//! let result = folder.fold(&Sequence::from_codes(&[0, 1, 1, 0, 1, 0]))?;
//! assert_eq!(result.energy, -2.0);
//! assert!(result.stability > 0.0 && result.stability <= 1.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
