use phf::{Map, phf_map};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One-letter amino-acid codes; a residue's monomer code is its index here.
pub const AMINO_ACID_LETTERS: &str = "ACDEFGHIKLMNPQRSTVWY";

pub const NUM_AMINO_ACIDS: usize = 20;

static AMINO_ACID_CODES: Map<char, u8> = phf_map! {
    'A' => 0, 'C' => 1, 'D' => 2, 'E' => 3, 'F' => 4,
    'G' => 5, 'H' => 6, 'I' => 7, 'K' => 8, 'L' => 9,
    'M' => 10, 'N' => 11, 'P' => 12, 'Q' => 13, 'R' => 14,
    'S' => 15, 'T' => 16, 'V' => 17, 'W' => 18, 'Y' => 19,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Unknown residue letter '{letter}' at position {position}")]
    UnknownResidueLetter { letter: char, position: usize },
}

/// A monomer type code, used as an index into an energy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomer(pub u8);

impl Monomer {
    pub fn from_letter(letter: char) -> Option<Self> {
        AMINO_ACID_CODES
            .get(&letter.to_ascii_uppercase())
            .copied()
            .map(Monomer)
    }

    /// The amino-acid letter for codes inside the 20-letter alphabet.
    pub fn letter(self) -> Option<char> {
        AMINO_ACID_LETTERS.chars().nth(self.index())
    }

    #[inline]
    pub fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An immutable chain of monomers, indexed from 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    monomers: Vec<Monomer>,
}

impl Sequence {
    pub fn new(monomers: Vec<Monomer>) -> Self {
        Self { monomers }
    }

    pub fn from_codes(codes: &[u8]) -> Self {
        Self::new(codes.iter().copied().map(Monomer).collect())
    }

    pub fn from_letters(letters: &str) -> Result<Self, SequenceError> {
        letters
            .trim()
            .chars()
            .enumerate()
            .map(|(position, letter)| {
                Monomer::from_letter(letter)
                    .ok_or(SequenceError::UnknownResidueLetter { letter, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// A sequence with every monomer drawn uniformly from `0..num_types`.
    pub fn random(length: usize, num_types: u8, rng: &mut impl Rng) -> Self {
        Self::new(
            (0..length)
                .map(|_| Monomer(rng.gen_range(0..num_types.max(1))))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }

    #[inline]
    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<Monomer> {
        self.monomers.get(position).copied()
    }

    /// A copy of this sequence with one position replaced.
    pub fn with_substitution(&self, position: usize, monomer: Monomer) -> Self {
        let mut monomers = self.monomers.clone();
        if let Some(slot) = monomers.get_mut(position) {
            *slot = monomer;
        }
        Self::new(monomers)
    }

    /// One-letter rendering; `None` if any code lies outside the amino-acid alphabet.
    pub fn to_letters(&self) -> Option<String> {
        self.monomers.iter().map(|m| m.letter()).collect()
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_letters(s)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_letters() {
            Some(letters) => write!(f, "{letters}"),
            None => {
                let codes: Vec<String> = self.monomers.iter().map(|m| m.0.to_string()).collect();
                write!(f, "{}", codes.join("-"))
            }
        }
    }
}
