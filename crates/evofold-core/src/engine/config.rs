use crate::core::decoys::DecoyError;
use crate::core::energy::table::{EnergyTable, EnergyTableError};
use crate::core::io::error::LoadError;
use crate::core::lattice::geometry::{LatticeError, LatticeGeometry};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_DIMENSIONALITY: usize = 2;
pub const DEFAULT_MAX_LENGTH: usize = 25;
pub const DEFAULT_TEMPERATURE: f64 = 0.6;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Temperature must be a positive, finite number, got {0}")]
    NonPositiveTemperature(f64),

    #[error("Log conformation count must be finite, got {0}")]
    InvalidLogConformations(f64),

    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error("Energy table error: {0}")]
    EnergyTable(#[from] EnergyTableError),

    #[error("Decoy set error: {0}")]
    Decoys(#[from] DecoyError),
}

/// Which conformation set a fold is evaluated on. Results of the two modes are
/// not numerically comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldMode {
    #[default]
    Exact,
    Decoy,
}

impl fmt::Display for FoldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldMode::Exact => write!(f, "exact"),
            FoldMode::Decoy => write!(f, "decoy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FolderConfig {
    pub dimensionality: usize,
    pub max_length: usize,
    pub energy_table: Arc<EnergyTable>,
    pub temperature: f64,
    pub mode: FoldMode,
    /// Natural log of the size of the full conformational space that a decoy
    /// set stands in for. Enables the random-energy-model free energy in
    /// decoy folds.
    pub log_num_conformations: Option<f64>,
}

impl FolderConfig {
    pub fn builder() -> FolderConfigBuilder {
        FolderConfigBuilder::new()
    }

    pub fn geometry(&self) -> Result<LatticeGeometry, ConfigError> {
        Ok(LatticeGeometry::new(self.dimensionality)?)
    }

    /// Re-checks the fields the builder validates. The fields are public, so
    /// folders call this again on construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry()?;
        validate_temperature(self.temperature)?;
        validate_log_num_conformations(self.log_num_conformations)
    }

    /// The same configuration at another temperature.
    pub fn with_temperature(&self, temperature: f64) -> Result<Self, ConfigError> {
        validate_temperature(temperature)?;
        Ok(Self {
            temperature,
            ..self.clone()
        })
    }
}

#[derive(Default)]
pub struct FolderConfigBuilder {
    dimensionality: Option<usize>,
    max_length: Option<usize>,
    energy_table: Option<Arc<EnergyTable>>,
    temperature: Option<f64>,
    mode: Option<FoldMode>,
    log_num_conformations: Option<f64>,
}

impl FolderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensionality(mut self, dimensionality: usize) -> Self {
        self.dimensionality = Some(dimensionality);
        self
    }
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
    pub fn energy_table(mut self, table: impl Into<Arc<EnergyTable>>) -> Self {
        self.energy_table = Some(table.into());
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn mode(mut self, mode: FoldMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn log_num_conformations(mut self, log_num_conformations: f64) -> Self {
        self.log_num_conformations = Some(log_num_conformations);
        self
    }

    pub fn build(self) -> Result<FolderConfig, ConfigError> {
        let dimensionality = self
            .dimensionality
            .ok_or(ConfigError::MissingParameter("dimensionality"))?;
        LatticeGeometry::new(dimensionality)?;

        let temperature = self
            .temperature
            .ok_or(ConfigError::MissingParameter("temperature"))?;
        validate_temperature(temperature)?;

        validate_log_num_conformations(self.log_num_conformations)?;

        Ok(FolderConfig {
            dimensionality,
            max_length: self
                .max_length
                .ok_or(ConfigError::MissingParameter("max_length"))?,
            energy_table: self
                .energy_table
                .ok_or(ConfigError::MissingParameter("energy_table"))?,
            temperature,
            mode: self.mode.unwrap_or_default(),
            log_num_conformations: self.log_num_conformations,
        })
    }
}

pub(crate) fn validate_temperature(temperature: f64) -> Result<(), ConfigError> {
    if temperature.is_finite() && temperature > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveTemperature(temperature))
    }
}

pub(crate) fn validate_log_num_conformations(value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(value) if !value.is_finite() => Err(ConfigError::InvalidLogConformations(value)),
        _ => Ok(()),
    }
}

/// Scalar folder settings as read from a TOML file. The energy table is
/// supplied separately.
///
/// ```toml
/// dimensionality = 2
/// max_length = 25
/// temperature = 0.6
/// mode = "exact"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolderSettings {
    pub dimensionality: usize,
    pub max_length: usize,
    pub temperature: f64,
    pub mode: FoldMode,
    pub log_num_conformations: Option<f64>,
}

impl Default for FolderSettings {
    fn default() -> Self {
        Self {
            dimensionality: DEFAULT_DIMENSIONALITY,
            max_length: DEFAULT_MAX_LENGTH,
            temperature: DEFAULT_TEMPERATURE,
            mode: FoldMode::Exact,
            log_num_conformations: None,
        }
    }
}

impl FolderSettings {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        toml::from_str(&content).map_err(|e| LoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn into_builder(self) -> FolderConfigBuilder {
        let builder = FolderConfigBuilder::new()
            .dimensionality(self.dimensionality)
            .max_length(self.max_length)
            .temperature(self.temperature)
            .mode(self.mode);
        match self.log_num_conformations {
            Some(value) => builder.log_num_conformations(value),
            None => builder,
        }
    }
}
