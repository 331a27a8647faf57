use crate::core::decoys::DecoyError;
use crate::core::energy::table::EnergyTableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Malformed line {line} in '{path}': {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
    #[error("Invalid energy table in '{path}': {source}")]
    EnergyTable {
        path: String,
        source: EnergyTableError,
    },
    #[error("Invalid decoy set from '{path}': {source}")]
    Decoys { path: String, source: DecoyError },
}

impl LoadError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }
}
