use super::config::ConfigError;
use crate::core::energy::contact::ContactEnergyError;
use crate::core::energy::table::EnergyTableError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("Chain length {length} exceeds the enumeration ceiling of {max_length}")]
    ExceedsCeiling { length: usize, max_length: usize },

    #[error("Chain length {length} does not fill a compact box on a {dimensionality}D lattice")]
    NonCompact {
        length: usize,
        dimensionality: usize,
    },

    #[error("Chain length {length} does not match the decoy set length {expected}")]
    LengthMismatch { length: usize, expected: usize },
}

/// Why a fold failed. A fold never returns partial results.
///
/// `Capacity` and `Configuration` describe caller input. `Invariant` means the
/// conformation set or energy table itself is broken; retrying cannot help.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FoldError {
    #[error("Unsupported chain length: {0}")]
    Capacity(#[from] CapacityError),

    #[error("Invalid folder configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

impl From<EnergyTableError> for FoldError {
    fn from(source: EnergyTableError) -> Self {
        Self::Configuration(ConfigError::EnergyTable(source))
    }
}

impl From<ContactEnergyError> for FoldError {
    fn from(source: ContactEnergyError) -> Self {
        Self::Invariant(format!("contact scoring failed: {source}"))
    }
}
