use super::table::EnergyTable;
use crate::core::models::conformation::Conformation;
use crate::core::models::sequence::Sequence;
use thiserror::Error;

/// Lookup failures while scoring. Folders validate their input first, so
/// either variant means a malformed conformation set or table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactEnergyError {
    #[error("Contact references position {position} of a chain with {length} monomers")]
    PositionOutOfRange { position: usize, length: usize },
    #[error("No contact energy defined for monomer pair ({first}, {second})")]
    MissingPair { first: u8, second: u8 },
}

/// Sums the pair energies of every contact of `conformation` for `sequence`.
pub fn energy_of(
    table: &EnergyTable,
    sequence: &Sequence,
    conformation: &Conformation,
) -> Result<f64, ContactEnergyError> {
    let monomers = sequence.monomers();
    let monomer_at = |position: usize| {
        monomers
            .get(position)
            .copied()
            .ok_or(ContactEnergyError::PositionOutOfRange {
                position,
                length: monomers.len(),
            })
    };

    let mut energy = 0.0;
    for contact in conformation.contacts() {
        let (a, b) = (monomer_at(contact.first)?, monomer_at(contact.second)?);
        energy += table
            .get(a, b)
            .ok_or(ContactEnergyError::MissingPair {
                first: a.code(),
                second: b.code(),
            })?;
    }
    Ok(energy)
}
