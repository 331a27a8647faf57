use super::fold::{Fold, fold_batch};
use crate::core::models::sequence::{Monomer, Sequence};
use crate::engine::error::FoldError;
use tracing::{debug, instrument};

/// Fraction of single-point mutants of `sequence` that keep its native
/// structure with a free energy of at most `free_energy_cutoff`.
///
/// Every position is tried with every other monomer type of the folder's
/// energy table. Returns 0 when there are no mutants to try.
#[instrument(level = "debug", skip_all, fields(length = sequence.len(), cutoff = free_energy_cutoff))]
pub fn neutrality(
    folder: &dyn Fold,
    sequence: &Sequence,
    free_energy_cutoff: f64,
) -> Result<f64, FoldError> {
    let wild_type = folder.fold(sequence)?;
    let num_types = folder.config().energy_table.num_types();

    let mutants: Vec<Sequence> = sequence
        .monomers()
        .iter()
        .enumerate()
        .flat_map(|(position, &original)| {
            (0..num_types)
                .map(|code| Monomer(code as u8))
                .filter(move |&monomer| monomer != original)
                .map(move |monomer| sequence.with_substitution(position, monomer))
        })
        .collect();
    if mutants.is_empty() {
        return Ok(0.0);
    }

    let mut neutral = 0;
    for result in fold_batch(folder, &mutants) {
        let result = result?;
        if result.structure == wild_type.structure && result.delta_g <= free_energy_cutoff {
            neutral += 1;
        }
    }

    let fraction = neutral as f64 / mutants.len() as f64;
    debug!(mutants = mutants.len(), neutral, fraction, "Neutrality computed.");
    Ok(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::table::EnergyTable;
    use crate::engine::config::FolderConfigBuilder;
    use crate::workflows::fold::LatticeFolder;

    fn folder(matrix: &[Vec<f64>]) -> LatticeFolder {
        let config = FolderConfigBuilder::new()
            .dimensionality(2)
            .max_length(9)
            .energy_table(EnergyTable::from_matrix(matrix).unwrap())
            .temperature(1.0)
            .build()
            .unwrap();
        LatticeFolder::new(config).unwrap()
    }

    #[test]
    fn flat_energy_landscape_is_fully_neutral_under_a_loose_cutoff() {
        let folder = folder(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        let sequence = Sequence::from_codes(&[0, 1, 0, 1]);
        assert_eq!(neutrality(&folder, &sequence, f64::INFINITY).unwrap(), 1.0);
        // One conformation: every mutant has delta G of minus infinity.
        assert_eq!(neutrality(&folder, &sequence, -1e9).unwrap(), 1.0);
        assert_eq!(folder.num_folded(), 10);
    }

    #[test]
    fn degenerate_mutants_fail_a_strict_cutoff() {
        let folder = folder(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        let sequence = Sequence::from_codes(&[0, 0, 0, 0, 0, 0]);
        // Four equal-energy conformations: delta G = ln 3 for every mutant.
        assert_eq!(neutrality(&folder, &sequence, 0.0).unwrap(), 0.0);
        assert_eq!(neutrality(&folder, &sequence, 2.0).unwrap(), 1.0);
    }

    #[test]
    fn single_type_tables_have_no_mutants() {
        let folder = folder(&[vec![-1.0]]);
        assert_eq!(neutrality(&folder, &Sequence::from_codes(&[0; 4]), 0.0).unwrap(), 0.0);
    }

    #[test]
    fn unsupported_lengths_propagate_the_fold_error() {
        let folder = folder(&[vec![-1.0, 0.0], vec![0.0, 0.0]]);
        assert!(matches!(
            neutrality(&folder, &Sequence::from_codes(&[0; 7]), 0.0),
            Err(FoldError::Capacity(_))
        ));
    }
}
