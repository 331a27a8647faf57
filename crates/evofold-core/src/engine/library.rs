use super::config::{ConfigError, FolderConfig};
use super::enumeration::enumerate_compact;
use super::error::{CapacityError, FoldError};
use crate::core::lattice::geometry::LatticeGeometry;
use crate::core::lattice::shape::LatticeShape;
use crate::core::models::conformation::ConformationSet;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, info, instrument};

type Slot = Arc<OnceCell<Arc<ConformationSet>>>;

/// Lazily enumerated compact conformations, cached per chain length.
///
/// The map lock is only held while fetching or inserting the per-length slot.
/// Population happens inside the slot's `OnceCell`, so concurrent callers for
/// the same length wait for the first enumeration to finish, while callers for
/// other lengths proceed. Populated sets are never mutated.
#[derive(Debug)]
pub struct ConformationLibrary {
    geometry: LatticeGeometry,
    max_length: usize,
    slots: Mutex<HashMap<usize, Slot>>,
}

impl ConformationLibrary {
    pub fn new(geometry: LatticeGeometry, max_length: usize) -> Self {
        Self {
            geometry,
            max_length,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &FolderConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.geometry()?, config.max_length))
    }

    #[inline]
    pub fn geometry(&self) -> &LatticeGeometry {
        &self.geometry
    }

    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The compact box for `length`, if the length may be enumerated at all.
    pub fn shape_for(&self, length: usize) -> Result<LatticeShape, CapacityError> {
        if length > self.max_length {
            return Err(CapacityError::ExceedsCeiling {
                length,
                max_length: self.max_length,
            });
        }
        self.geometry
            .shape_for(length)
            .ok_or(CapacityError::NonCompact {
                length,
                dimensionality: self.geometry.dimensionality(),
            })
    }

    /// All distinct compact conformations of `length`, in canonical order.
    ///
    /// The first call for a length enumerates; later calls return the same `Arc`.
    #[instrument(level = "debug", skip(self))]
    pub fn conformations_for(&self, length: usize) -> Result<Arc<ConformationSet>, FoldError> {
        let shape = self.shape_for(length)?;

        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(length).or_default())
        };
        if let Some(set) = slot.get() {
            debug!(length, "Conformation cache hit.");
            return Ok(Arc::clone(set));
        }

        let set = slot.get_or_try_init(|| self.populate(length, shape))?;
        Ok(Arc::clone(set))
    }

    pub fn is_cached(&self, length: usize) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(&length).is_some_and(|slot| slot.get().is_some())
    }

    /// Lengths whose conformations are already enumerated, ascending.
    pub fn cached_lengths(&self) -> Vec<usize> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let mut lengths: Vec<usize> = slots
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(&length, _)| length)
            .collect();
        lengths.sort_unstable();
        lengths
    }

    fn populate(&self, length: usize, shape: LatticeShape) -> Result<Arc<ConformationSet>, FoldError> {
        let started = Instant::now();
        let enumeration = enumerate_compact(&self.geometry, &shape);

        if enumeration.conformations.is_empty() {
            return Err(FoldError::Invariant(format!(
                "no compact walks found for length {length} on a {shape} box"
            )));
        }
        if let Some(bad) = enumeration.conformations.iter().find(|c| c.len() != length) {
            return Err(FoldError::Invariant(format!(
                "conformation {} has {} positions, expected {length}",
                bad.id(),
                bad.len()
            )));
        }
        debug_assert!(
            enumeration
                .conformations
                .iter()
                .all(|c| c.is_valid_walk(&self.geometry))
        );

        info!(
            length,
            shape = %shape,
            walks = enumeration.walks,
            conformations = enumeration.conformations.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Enumerated compact conformations."
        );
        Ok(Arc::new(ConformationSet::new(
            length,
            Some(shape),
            enumeration.conformations,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn conformations_for_caches_each_length() {
        let library = ConformationLibrary::new(LatticeGeometry::square(), 16);
        assert!(!library.is_cached(9));

        let first = library.conformations_for(9).unwrap();
        let second = library.conformations_for(9).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 5);
        assert_eq!(first.shape().map(|s| s.sides().to_vec()), Some(vec![3, 3]));
        assert!(library.is_cached(9));
        assert_eq!(library.cached_lengths(), vec![9]);
    }

    #[test]
    fn structure_ids_follow_canonical_order() {
        let library = ConformationLibrary::new(LatticeGeometry::square(), 16);
        let set = library.conformations_for(16).unwrap();
        for (index, conformation) in set.iter().enumerate() {
            assert_eq!(conformation.id().index(), index);
        }
        assert!(set.conformations().windows(2).all(|w| w[0].contacts() < w[1].contacts()));
    }

    #[test]
    fn lengths_above_the_ceiling_fail_without_enumerating() {
        let library = ConformationLibrary::new(LatticeGeometry::square(), 9);
        let result = library.conformations_for(16);
        assert_eq!(
            result.unwrap_err(),
            FoldError::Capacity(CapacityError::ExceedsCeiling {
                length: 16,
                max_length: 9
            })
        );
        assert!(library.cached_lengths().is_empty());
    }

    #[test]
    fn non_compact_lengths_are_rejected() {
        let library = ConformationLibrary::new(LatticeGeometry::cubic(), 27);
        assert_eq!(
            library.conformations_for(9).unwrap_err(),
            FoldError::Capacity(CapacityError::NonCompact {
                length: 9,
                dimensionality: 3
            })
        );
    }

    #[test]
    fn concurrent_first_requests_share_one_population() {
        let library = ConformationLibrary::new(LatticeGeometry::square(), 16);
        let sets: Vec<Arc<ConformationSet>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let library = &library;
                    let length = if i % 2 == 0 { 16 } else { 12 };
                    scope.spawn(move || library.conformations_for(length).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for pair in sets.chunks(2).collect::<Vec<_>>().windows(2) {
            assert!(Arc::ptr_eq(&pair[0][0], &pair[1][0]));
            assert!(Arc::ptr_eq(&pair[0][1], &pair[1][1]));
        }
        assert_eq!(library.cached_lengths(), vec![12, 16]);
    }
}
