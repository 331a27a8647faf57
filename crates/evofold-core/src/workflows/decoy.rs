use super::fold::{Fold, FoldResult, fold_on_decoys};
use crate::core::decoys::DecoySet;
use crate::core::models::sequence::Sequence;
use crate::engine::config::{ConfigError, FoldMode, FolderConfig};
use crate::engine::error::FoldError;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::instrument;

/// Folder bound to one decoy set, for chains too long to enumerate.
///
/// Stability is the Boltzmann probability of the native state among the
/// decoys only. It is not comparable to the exact value and can come out
/// higher or lower when the true ground state is missing from the set.
#[derive(Debug)]
pub struct DecoyFolder {
    config: FolderConfig,
    decoys: DecoySet,
    folded: AtomicUsize,
}

impl DecoyFolder {
    pub fn new(config: FolderConfig, decoys: DecoySet) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            decoys,
            folded: AtomicUsize::new(0),
        })
    }

    pub fn decoys(&self) -> &DecoySet {
        &self.decoys
    }
}

impl Fold for DecoyFolder {
    #[instrument(level = "debug", skip_all, fields(length = sequence.len()))]
    fn fold(&self, sequence: &Sequence) -> Result<FoldResult, FoldError> {
        let result = fold_on_decoys(&self.config, &self.decoys, sequence)?;
        self.folded.fetch_add(1, Ordering::Relaxed);
        Ok(result)
    }

    fn mode(&self) -> FoldMode {
        FoldMode::Decoy
    }

    fn num_folded(&self) -> usize {
        self.folded.load(Ordering::Relaxed)
    }

    fn config(&self) -> &FolderConfig {
        &self.config
    }
}
