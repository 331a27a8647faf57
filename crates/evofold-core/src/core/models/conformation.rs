use super::ids::StructureId;
use crate::core::lattice::geometry::{LatticeGeometry, Site};
use crate::core::lattice::shape::LatticeShape;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConformationError {
    #[error("Conformation has no positions")]
    Empty,
    #[error("Positions {first} and {second} occupy the same lattice site")]
    SelfIntersection { first: usize, second: usize },
    #[error("Positions {position} and {next} are not on adjacent lattice sites", next = .position + 1)]
    Disconnected { position: usize },
    #[error("Contact ({first}, {second}) is not a pair of non-adjacent positions below {length}")]
    InvalidContact {
        first: usize,
        second: usize,
        length: usize,
    },
}

/// Two chain positions, `first < second - 1`, sitting on adjacent lattice sites.
///
/// Ordering is lexicographic on `(first, second)`, which makes a sorted
/// contact list a canonical signature of the conformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Contact {
    pub first: usize,
    pub second: usize,
}

impl Contact {
    /// Builds a contact from two positions in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    #[inline]
    fn is_valid_for(&self, length: usize) -> bool {
        self.first + 1 < self.second && self.second < length
    }
}

/// A chain conformation: its sorted contact set and, for enumerated
/// structures, the lattice embedding it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conformation {
    id: StructureId,
    length: usize,
    contacts: Vec<Contact>,
    sites: Option<Vec<Site>>,
}

impl Conformation {
    /// Validates a lattice walk and derives its contacts.
    pub fn from_sites(
        id: StructureId,
        sites: Vec<Site>,
        geometry: &LatticeGeometry,
    ) -> Result<Self, ConformationError> {
        if sites.is_empty() {
            return Err(ConformationError::Empty);
        }

        let mut occupancy: HashMap<Site, usize> = HashMap::with_capacity(sites.len());
        for (position, site) in sites.iter().enumerate() {
            if let Some(first) = occupancy.insert(*site, position) {
                return Err(ConformationError::SelfIntersection {
                    first,
                    second: position,
                });
            }
        }
        if let Some(position) = sites
            .windows(2)
            .position(|pair| !geometry.are_adjacent(&pair[0], &pair[1]))
        {
            return Err(ConformationError::Disconnected { position });
        }

        let mut contacts = Vec::new();
        for (position, site) in sites.iter().enumerate() {
            for neighbor in geometry.neighbors(site) {
                if let Some(&other) = occupancy.get(&neighbor) {
                    if other > position + 1 {
                        contacts.push(Contact::new(position, other));
                    }
                }
            }
        }
        contacts.sort_unstable();

        Ok(Self {
            id,
            length: sites.len(),
            contacts,
            sites: Some(sites),
        })
    }

    /// A contact-map-only conformation, as used by decoy sets.
    pub fn from_contacts(
        id: StructureId,
        length: usize,
        mut contacts: Vec<Contact>,
    ) -> Result<Self, ConformationError> {
        if length == 0 {
            return Err(ConformationError::Empty);
        }
        if let Some(bad) = contacts.iter().find(|c| !c.is_valid_for(length)) {
            return Err(ConformationError::InvalidContact {
                first: bad.first,
                second: bad.second,
                length,
            });
        }
        contacts.sort_unstable();
        contacts.dedup();
        Ok(Self {
            id,
            length,
            contacts,
            sites: None,
        })
    }

    /// Trusted constructor for the enumerator, which already holds sorted contacts.
    pub(crate) fn embedded(id: StructureId, sites: Vec<Site>, contacts: Vec<Contact>) -> Self {
        Self {
            id,
            length: sites.len(),
            contacts,
            sites: Some(sites),
        }
    }

    pub(crate) fn with_id(mut self, id: StructureId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> StructureId {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The sorted contact list, which doubles as the canonical signature.
    #[inline]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    #[inline]
    pub fn sites(&self) -> Option<&[Site]> {
        self.sites.as_deref()
    }

    /// Checks connectivity and self-avoidance of the embedding, if there is one.
    pub fn is_valid_walk(&self, geometry: &LatticeGeometry) -> bool {
        match &self.sites {
            Some(sites) => Self::from_sites(self.id, sites.clone(), geometry)
                .is_ok_and(|derived| derived.contacts == self.contacts),
            None => false,
        }
    }

    /// ASCII drawing of a planar embedding: `S` and `E` mark the chain ends,
    /// `o` the interior monomers, `-` and `|` the bonds.
    pub fn render(&self, shape: &LatticeShape) -> Option<String> {
        let sites = self.sites.as_ref()?;
        if shape.dimensionality() != 2 || !sites.iter().all(|site| shape.contains(site)) {
            return None;
        }
        let width = shape.sides()[0] * 2 - 1;
        let height = shape.sides()[1] * 2 - 1;
        let mut canvas = vec![vec![' '; width]; height];

        let last = sites.len() - 1;
        for (position, site) in sites.iter().enumerate() {
            let (x, y) = (site.x as usize * 2, site.y as usize * 2);
            canvas[y][x] = match position {
                0 => 'S',
                p if p == last => 'E',
                _ => 'o',
            };
        }
        for pair in sites.windows(2) {
            let (x, y) = (
                (pair[0].x + pair[1].x) as usize,
                (pair[0].y + pair[1].y) as usize,
            );
            canvas[y][x] = if pair[0].y == pair[1].y { '-' } else { '|' };
        }

        let rows: Vec<String> = canvas
            .into_iter()
            .rev()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect();
        Some(rows.join("\n"))
    }
}

/// An ordered, immutable collection of conformations of one chain length.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformationSet {
    length: usize,
    shape: Option<LatticeShape>,
    conformations: Vec<Conformation>,
}

impl ConformationSet {
    /// Re-numbers the conformations so that ids match their positions.
    pub fn new(length: usize, shape: Option<LatticeShape>, conformations: Vec<Conformation>) -> Self {
        let conformations = conformations
            .into_iter()
            .enumerate()
            .map(|(index, c)| c.with_id(StructureId(index)))
            .collect();
        Self {
            length,
            shape,
            conformations,
        }
    }

    #[inline]
    pub fn chain_length(&self) -> usize {
        self.length
    }

    /// The lattice box of an enumerated set; `None` for decoys.
    #[inline]
    pub fn shape(&self) -> Option<&LatticeShape> {
        self.shape.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.conformations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.conformations.is_empty()
    }

    #[inline]
    pub fn get(&self, id: StructureId) -> Option<&Conformation> {
        self.conformations.get(id.index())
    }

    #[inline]
    pub fn conformations(&self) -> &[Conformation] {
        &self.conformations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Conformation> {
        self.conformations.iter()
    }
}

impl<'a> IntoIterator for &'a ConformationSet {
    type Item = &'a Conformation;
    type IntoIter = std::slice::Iter<'a, Conformation>;

    fn into_iter(self) -> Self::IntoIter {
        self.conformations.iter()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
