use crate::core::io::error::LoadError;
use crate::core::models::sequence::{Monomer, NUM_AMINO_ACIDS, Sequence};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnergyTableError {
    #[error("Energy table must cover between 1 and 256 monomer types, got {0}")]
    InvalidTypeCount(usize),
    #[error("Monomer type {code} is outside the table's {num_types} types")]
    UnknownMonomer { code: u8, num_types: usize },
    #[error("No contact energy defined for monomer pair ({first}, {second})")]
    MissingEnergy { first: u8, second: u8 },
    #[error("Contact energy for ({first}, {second}) is not finite: {value}")]
    NonFiniteEnergy { first: u8, second: u8, value: f64 },
    #[error("Energy matrix is not symmetric at ({first}, {second}): {forward} vs {backward}")]
    AsymmetricEnergy {
        first: u8,
        second: u8,
        forward: f64,
        backward: f64,
    },
    #[error("Energy matrix row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Monomer token '{0}' is neither an amino-acid letter nor a numeric code")]
    UnknownToken(String),
}

#[derive(Debug, Deserialize)]
struct EnergyRecord {
    first: String,
    second: String,
    energy: f64,
}

/// Symmetric pairwise contact energies between monomer types.
///
/// Entries are optional so that partially specified tables can exist; a fold
/// checks up front that every pair its sequence can form is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTable {
    num_types: usize,
    values: Vec<Option<f64>>,
}

impl EnergyTable {
    pub fn new(num_types: usize) -> Result<Self, EnergyTableError> {
        if num_types == 0 || num_types > u8::MAX as usize + 1 {
            return Err(EnergyTableError::InvalidTypeCount(num_types));
        }
        Ok(Self {
            num_types,
            values: vec![None; num_types * num_types],
        })
    }

    /// Builds a complete table from a square, symmetric matrix.
    pub fn from_matrix(matrix: &[Vec<f64>]) -> Result<Self, EnergyTableError> {
        let mut table = Self::new(matrix.len())?;
        for (row, values) in matrix.iter().enumerate() {
            if values.len() != matrix.len() {
                return Err(EnergyTableError::RaggedMatrix {
                    row,
                    found: values.len(),
                    expected: matrix.len(),
                });
            }
        }
        for a in 0..matrix.len() {
            for b in a..matrix.len() {
                let (forward, backward) = (matrix[a][b], matrix[b][a]);
                if forward != backward {
                    return Err(EnergyTableError::AsymmetricEnergy {
                        first: a as u8,
                        second: b as u8,
                        forward,
                        backward,
                    });
                }
                table.set(Monomer(a as u8), Monomer(b as u8), forward)?;
            }
        }
        Ok(table)
    }

    /// Sets the energy of the unordered pair `{a, b}`.
    pub fn set(&mut self, a: Monomer, b: Monomer, energy: f64) -> Result<(), EnergyTableError> {
        self.check_monomer(a)?;
        self.check_monomer(b)?;
        if !energy.is_finite() {
            return Err(EnergyTableError::NonFiniteEnergy {
                first: a.code(),
                second: b.code(),
                value: energy,
            });
        }
        let (forward, backward) = (self.slot(a, b), self.slot(b, a));
        self.values[forward] = Some(energy);
        self.values[backward] = Some(energy);
        Ok(())
    }

    pub fn with(mut self, a: Monomer, b: Monomer, energy: f64) -> Result<Self, EnergyTableError> {
        self.set(a, b, energy)?;
        Ok(self)
    }

    #[inline]
    pub fn get(&self, a: Monomer, b: Monomer) -> Option<f64> {
        if a.index() >= self.num_types || b.index() >= self.num_types {
            return None;
        }
        self.values[self.slot(a, b)]
    }

    #[inline]
    pub fn num_types(&self) -> usize {
        self.num_types
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Verifies that every monomer of `sequence` belongs to the table and that
    /// every pair of monomer types present in it has an energy.
    pub fn check_sequence(&self, sequence: &Sequence) -> Result<(), EnergyTableError> {
        let mut present = vec![false; self.num_types];
        for &monomer in sequence.monomers() {
            self.check_monomer(monomer)?;
            present[monomer.index()] = true;
        }
        let types: Vec<u8> = (0..self.num_types)
            .filter(|&t| present[t])
            .map(|t| t as u8)
            .collect();
        for (i, &a) in types.iter().enumerate() {
            for &b in &types[i..] {
                if self.get(Monomer(a), Monomer(b)).is_none() {
                    return Err(EnergyTableError::MissingEnergy { first: a, second: b });
                }
            }
        }
        Ok(())
    }

    /// Reads a table from CSV rows `first,second,energy`.
    ///
    /// Monomers are given either as one-letter amino-acid codes or as numeric
    /// codes. The table covers the 20 amino acids whenever letters are used,
    /// otherwise the largest numeric code plus one.
    pub fn load_csv(path: &Path) -> Result<Self, LoadError> {
        let path_str = path.to_string_lossy().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_path(path)
            .map_err(|e| LoadError::Csv {
                path: path_str.clone(),
                source: e,
            })?;

        let to_table_error = |source: EnergyTableError| LoadError::EnergyTable {
            path: path_str.clone(),
            source,
        };

        let mut entries = Vec::new();
        let mut uses_letters = false;
        for result in reader.deserialize::<EnergyRecord>() {
            let record = result.map_err(|e| LoadError::Csv {
                path: path_str.clone(),
                source: e,
            })?;
            let (first, first_is_letter) = parse_token(&record.first).map_err(to_table_error)?;
            let (second, second_is_letter) = parse_token(&record.second).map_err(to_table_error)?;
            uses_letters |= first_is_letter || second_is_letter;
            entries.push((first, second, record.energy));
        }

        let max_code = entries
            .iter()
            .map(|(a, b, _)| a.index().max(b.index()))
            .max()
            .map_or(0, |code| code + 1);
        let num_types = if uses_letters {
            max_code.max(NUM_AMINO_ACIDS)
        } else {
            max_code
        };

        let mut table = Self::new(num_types).map_err(to_table_error)?;
        for (a, b, energy) in entries {
            table.set(a, b, energy).map_err(to_table_error)?;
        }
        Ok(table)
    }

    #[inline]
    fn slot(&self, a: Monomer, b: Monomer) -> usize {
        a.index() * self.num_types + b.index()
    }

    fn check_monomer(&self, monomer: Monomer) -> Result<(), EnergyTableError> {
        if monomer.index() < self.num_types {
            Ok(())
        } else {
            Err(EnergyTableError::UnknownMonomer {
                code: monomer.code(),
                num_types: self.num_types,
            })
        }
    }
}

fn parse_token(token: &str) -> Result<(Monomer, bool), EnergyTableError> {
    if let Ok(code) = token.parse::<u8>() {
        return Ok((Monomer(code), false));
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Monomer::from_letter(letter)
            .map(|m| (m, true))
            .ok_or_else(|| EnergyTableError::UnknownToken(token.to_string())),
        _ => Err(EnergyTableError::UnknownToken(token.to_string())),
    }
}
