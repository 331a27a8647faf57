//! # Decoys Module
//!
//! Fixed, externally supplied conformation sets for chains too long to enumerate.
//! A decoy is a contact map without an embedding; the set is validated once on
//! construction and shared read-only afterwards.
//!
//! Contact maps on disk follow the classic layout: a list file naming one map
//! per line, and in each map one contact per line as `i a j b`, where `i` and
//! `j` are zero-based positions and `a`, `b` the residue letters found there.

use crate::core::io::error::LoadError;
use crate::core::models::conformation::{
    Conformation, ConformationError, ConformationSet, Contact,
};
use crate::core::models::ids::StructureId;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecoyError {
    #[error("Decoy set contains no structures")]
    Empty,
    #[error("Decoy {index} is malformed: {source}")]
    InvalidDecoy {
        index: usize,
        source: ConformationError,
    },
}

/// A validated, immutable set of decoy contact maps for one chain length.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoySet {
    set: Arc<ConformationSet>,
}

impl DecoySet {
    pub fn new(length: usize, contact_maps: Vec<Vec<Contact>>) -> Result<Self, DecoyError> {
        if contact_maps.is_empty() {
            return Err(DecoyError::Empty);
        }
        let conformations = contact_maps
            .into_iter()
            .enumerate()
            .map(|(index, contacts)| {
                Conformation::from_contacts(StructureId(index), length, contacts)
                    .map_err(|source| DecoyError::InvalidDecoy { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            set: Arc::new(ConformationSet::new(length, None, conformations)),
        })
    }

    /// Reads every contact map named in `list_path` from `dir`.
    #[instrument(level = "debug", skip_all, fields(list = %list_path.display()))]
    pub fn load(list_path: &Path, dir: &Path, length: usize) -> Result<Self, LoadError> {
        let listing =
            std::fs::read_to_string(list_path).map_err(|e| LoadError::io(list_path, e))?;

        let mut contact_maps = Vec::new();
        for name in listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
        {
            contact_maps.push(read_contact_map(&dir.join(name))?);
        }
        debug!(maps = contact_maps.len(), "Read decoy contact maps.");

        Self::new(length, contact_maps).map_err(|source| LoadError::Decoys {
            path: list_path.to_string_lossy().to_string(),
            source,
        })
    }

    #[inline]
    pub fn chain_length(&self) -> usize {
        self.set.chain_length()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    #[inline]
    pub fn conformations(&self) -> &Arc<ConformationSet> {
        &self.set
    }
}

fn read_contact_map(path: &Path) -> Result<Vec<Contact>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let parse_error = |line: usize, message: String| LoadError::Parse {
        path: path.to_string_lossy().to_string(),
        line,
        message,
    };

    let mut contacts = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (first, second) = match fields.as_slice() {
            [first, _, second, _] => (*first, *second),
            _ => {
                return Err(parse_error(
                    number + 1,
                    format!("expected 4 fields, found {}", fields.len()),
                ));
            }
        };
        let position = |field: &str| {
            field
                .parse::<usize>()
                .map_err(|e| parse_error(number + 1, format!("bad position '{field}': {e}")))
        };
        contacts.push(Contact::new(position(first)?, position(second)?));
    }
    Ok(contacts)
}
