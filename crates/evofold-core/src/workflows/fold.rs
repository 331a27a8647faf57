use crate::core::decoys::DecoySet;
use crate::core::energy::contact::energy_of;
use crate::core::models::conformation::{Conformation, ConformationSet};
use crate::core::models::ids::StructureId;
use crate::core::models::sequence::Sequence;
use crate::engine::config::{ConfigError, FoldMode, FolderConfig};
use crate::engine::error::{CapacityError, FoldError};
use crate::engine::library::ConformationLibrary;
use crate::engine::stability::{random_energy_delta_g, summarize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::decoy::DecoyFolder;

/// Outcome of folding one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldResult {
    /// Index of the native conformation in the set it was folded on.
    pub structure: StructureId,
    pub energy: f64,
    pub stability: f64,
    pub delta_g: f64,
    pub mode: FoldMode,
    conformations: Arc<ConformationSet>,
}

impl FoldResult {
    pub fn native_conformation(&self) -> &Conformation {
        &self.conformations.conformations()[self.structure.index()]
    }

    pub fn num_conformations(&self) -> usize {
        self.conformations.len()
    }

    /// The full set the sequence was folded on.
    pub fn conformations(&self) -> &Arc<ConformationSet> {
        &self.conformations
    }
}

/// Anything that folds sequences. Implementations are shared across threads.
pub trait Fold: Send + Sync {
    fn fold(&self, sequence: &Sequence) -> Result<FoldResult, FoldError>;

    fn mode(&self) -> FoldMode;

    /// Successful folds performed so far.
    fn num_folded(&self) -> usize;

    fn config(&self) -> &FolderConfig;
}

/// Exact folder over every compact conformation of a chain.
#[derive(Debug)]
pub struct LatticeFolder {
    config: FolderConfig,
    library: Arc<ConformationLibrary>,
    folded: AtomicUsize,
}

impl LatticeFolder {
    pub fn new(config: FolderConfig) -> Result<Self, ConfigError> {
        let library = Arc::new(ConformationLibrary::from_config(&config)?);
        Self::with_library(config, library)
    }

    /// A folder sharing an existing library, and therefore its cache. The
    /// library's lattice and length ceiling take precedence over `config`.
    pub fn with_library(
        config: FolderConfig,
        library: Arc<ConformationLibrary>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            library,
            folded: AtomicUsize::new(0),
        })
    }

    pub fn library(&self) -> &Arc<ConformationLibrary> {
        &self.library
    }

    /// Folds `sequence` on an externally supplied decoy set instead of the
    /// enumerated library.
    pub fn fold_with_decoys(
        &self,
        sequence: &Sequence,
        decoys: &DecoySet,
    ) -> Result<FoldResult, FoldError> {
        let result = fold_on_decoys(&self.config, decoys, sequence)?;
        self.folded.fetch_add(1, Ordering::Relaxed);
        Ok(result)
    }
}

impl Fold for LatticeFolder {
    #[instrument(level = "debug", skip_all, fields(length = sequence.len()))]
    fn fold(&self, sequence: &Sequence) -> Result<FoldResult, FoldError> {
        self.config.energy_table.check_sequence(sequence)?;
        let set = self.library.conformations_for(sequence.len())?;
        let result = fold_on_set(&self.config, &set, sequence, FoldMode::Exact)?;
        self.folded.fetch_add(1, Ordering::Relaxed);
        Ok(result)
    }

    fn mode(&self) -> FoldMode {
        FoldMode::Exact
    }

    fn num_folded(&self) -> usize {
        self.folded.load(Ordering::Relaxed)
    }

    fn config(&self) -> &FolderConfig {
        &self.config
    }
}

/// Builds the folder `config.mode` asks for. Decoy mode needs `decoys`.
pub fn build_folder(
    config: FolderConfig,
    decoys: Option<DecoySet>,
) -> Result<Box<dyn Fold>, ConfigError> {
    match config.mode {
        FoldMode::Exact => Ok(Box::new(LatticeFolder::new(config)?)),
        FoldMode::Decoy => {
            let decoys = decoys.ok_or(ConfigError::MissingParameter("decoys"))?;
            Ok(Box::new(DecoyFolder::new(config, decoys)?))
        }
    }
}

/// Folds every sequence, preserving input order. Each fold succeeds or fails
/// on its own.
#[instrument(level = "debug", skip_all, fields(count = sequences.len()))]
pub fn fold_batch(folder: &dyn Fold, sequences: &[Sequence]) -> Vec<Result<FoldResult, FoldError>> {
    #[cfg(not(feature = "parallel"))]
    let iterator = sequences.iter();

    #[cfg(feature = "parallel")]
    let iterator = sequences.par_iter();

    iterator.map(|sequence| folder.fold(sequence)).collect()
}

pub(crate) fn fold_on_decoys(
    config: &FolderConfig,
    decoys: &DecoySet,
    sequence: &Sequence,
) -> Result<FoldResult, FoldError> {
    config.energy_table.check_sequence(sequence)?;
    if sequence.len() != decoys.chain_length() {
        return Err(CapacityError::LengthMismatch {
            length: sequence.len(),
            expected: decoys.chain_length(),
        }
        .into());
    }
    fold_on_set(config, decoys.conformations(), sequence, FoldMode::Decoy)
}

fn fold_on_set(
    config: &FolderConfig,
    set: &Arc<ConformationSet>,
    sequence: &Sequence,
    mode: FoldMode,
) -> Result<FoldResult, FoldError> {
    let energies = set
        .iter()
        .map(|conformation| energy_of(&config.energy_table, sequence, conformation))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = summarize(&energies, config.temperature)?;
    let delta_g = match (mode, config.log_num_conformations) {
        (FoldMode::Decoy, Some(log_num_conformations)) => random_energy_delta_g(
            &energies,
            summary.native_energy,
            config.temperature,
            log_num_conformations,
        )?,
        _ => summary.delta_g,
    };

    debug!(
        %mode,
        structure = summary.native_index,
        energy = summary.native_energy,
        stability = summary.stability,
        delta_g,
        "Folded sequence."
    );

    Ok(FoldResult {
        structure: StructureId(summary.native_index),
        energy: summary.native_energy,
        stability: summary.stability,
        delta_g,
        mode,
        conformations: Arc::clone(set),
    })
}
